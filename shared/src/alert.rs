//! Alert styles and the confirm reply channel.
//!
//! The view layer owns the actual DOM nodes; this module decides how an
//! alert looks and how a confirm prompt reports back to whoever awaits it.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;

pub const DEFAULT_ALERT_DURATION_MS: u32 = 3000;
/// Delay before a fresh alert fades in.
pub const FADE_IN_DELAY_MS: u32 = 100;
/// Time between fade-out and removal.
pub const FADE_OUT_MS: u32 = 500;

const BASE_CLASSES: &str = "px-4 py-2 rounded-lg shadow-md text-white flex items-center justify-between gap-4 animate-slideDown transition-opacity";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
    Warning,
    Info,
}

impl AlertKind {
    /// Unknown kinds render with the info style.
    #[cfg(test)]
    fn parse(kind: &str) -> Self {
        match kind {
            "success" => AlertKind::Success,
            "error" => AlertKind::Error,
            "warning" => AlertKind::Warning,
            _ => AlertKind::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::Success => "success",
            AlertKind::Error => "error",
            AlertKind::Warning => "warning",
            AlertKind::Info => "info",
        }
    }

    pub fn style(self) -> &'static str {
        match self {
            AlertKind::Success => "bg-pink-500 border border-pink-700",
            AlertKind::Error => "bg-red border border-darkRed",
            AlertKind::Warning => "bg-yellow-500 border border-yellow-700 text-black",
            AlertKind::Info => "bg-blue-500 border border-blue-700",
        }
    }

    pub fn classes(self, visible: bool) -> String {
        let opacity = if visible { "opacity-100" } else { "opacity-0" };
        format!("{} {} {}", BASE_CLASSES, self.style(), opacity)
    }
}

// ── Confirm ──

/// Handed to the alert entry; consumed by whichever button is clicked first.
#[derive(Debug)]
pub struct ConfirmResponder {
    tx: oneshot::Sender<bool>,
}

impl ConfirmResponder {
    pub fn respond(self, confirmed: bool) {
        let _ = self.tx.send(confirmed);
    }
}

/// Resolves once the user picks a button. A responder dropped without an
/// answer counts as a cancel.
#[derive(Debug)]
pub enum ConfirmReply {
    Ready(bool),
    Pending(oneshot::Receiver<bool>),
}

impl ConfirmReply {
    /// Reply used when there is nowhere to show the prompt.
    pub fn declined() -> Self {
        ConfirmReply::Ready(false)
    }
}

impl Future for ConfirmReply {
    type Output = bool;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        match self.get_mut() {
            ConfirmReply::Ready(v) => Poll::Ready(*v),
            ConfirmReply::Pending(rx) => Pin::new(rx).poll(cx).map(|r| r.unwrap_or(false)),
        }
    }
}

pub fn confirm_channel() -> (ConfirmResponder, ConfirmReply) {
    let (tx, rx) = oneshot::channel();
    (ConfirmResponder { tx }, ConfirmReply::Pending(rx))
}

/// Opens a confirm prompt if there is somewhere to show it. Without an
/// alert container there is no responder and the reply is `false`.
pub fn open_confirm(mounted: bool) -> (Option<ConfirmResponder>, ConfirmReply) {
    if !mounted {
        return (None, ConfirmReply::declined());
    }
    let (responder, reply) = confirm_channel();
    (Some(responder), reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::FutureExt;

    #[test]
    fn unknown_kinds_use_info_style() {
        for kind in ["", "notice", "danger", "SUCCESS"] {
            assert_eq!(AlertKind::parse(kind), AlertKind::Info);
            assert_eq!(AlertKind::parse(kind).style(), AlertKind::Info.style());
        }
        assert_eq!(AlertKind::parse("warning"), AlertKind::Warning);
    }

    #[test]
    fn warning_uses_dark_text() {
        assert!(AlertKind::Warning.classes(true).contains("text-black"));
        assert!(AlertKind::Warning.classes(true).ends_with("opacity-100"));
        assert!(AlertKind::Info.classes(false).ends_with("opacity-0"));
    }

    #[test]
    fn confirm_resolves_true_on_confirm() {
        let (responder, reply) = confirm_channel();
        responder.respond(true);
        assert!(block_on(reply));
    }

    #[test]
    fn confirm_resolves_false_on_cancel() {
        let (responder, reply) = confirm_channel();
        responder.respond(false);
        assert!(!block_on(reply));
    }

    #[test]
    fn confirm_stays_pending_until_answered() {
        let (responder, mut reply) = confirm_channel();
        assert!((&mut reply).now_or_never().is_none());
        responder.respond(true);
        assert_eq!((&mut reply).now_or_never(), Some(true));
    }

    #[test]
    fn dropped_responder_counts_as_cancel() {
        let (responder, reply) = confirm_channel();
        drop(responder);
        assert!(!block_on(reply));
    }

    #[test]
    fn declined_reply_is_immediately_false() {
        assert_eq!(ConfirmReply::declined().now_or_never(), Some(false));
    }

    #[test]
    fn confirm_without_container_declines_at_once() {
        let (responder, reply) = open_confirm(false);
        assert!(responder.is_none());
        assert_eq!(reply.now_or_never(), Some(false));
    }

    #[test]
    fn confirm_with_container_waits_for_answer() {
        let (responder, mut reply) = open_confirm(true);
        assert!((&mut reply).now_or_never().is_none());
        responder.expect("prompt shown").respond(true);
        assert_eq!(reply.now_or_never(), Some(true));
    }
}
