//! Toast notifications
//!
//! Transient messages stacked in a corner of the page. A loading toast can
//! be replaced in place by its success or error outcome, keeping its slot
//! and id. Success and error toasts expire on their own; loading toasts
//! stay until replaced or dismissed.

use indexmap::IndexMap;

/// How long a success toast stays up
pub const SUCCESS_DURATION_MS: f64 = 2000.0;
/// How long an error toast stays up
pub const ERROR_DURATION_MS: f64 = 4000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Loading,
    Success,
    Error,
}

impl ToastKind {
    fn duration_ms(&self) -> Option<f64> {
        match self {
            ToastKind::Loading => None,
            ToastKind::Success => Some(SUCCESS_DURATION_MS),
            ToastKind::Error => Some(ERROR_DURATION_MS),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,
    /// When the toast took its current content
    pub shown_at_ms: f64,
}

impl Toast {
    pub fn expires_at_ms(&self) -> Option<f64> {
        self.kind.duration_ms().map(|d| self.shown_at_ms + d)
    }
}

/// Ordered set of visible toasts
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: IndexMap<ToastId, Toast>,
    next_id: u64,
    now_ms: f64,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loading(&mut self, message: impl Into<String>) -> ToastId {
        self.show(ToastKind::Loading, message.into(), None)
    }

    /// Show a success toast, replacing `replace` if it is still visible
    pub fn success(&mut self, message: impl Into<String>, replace: Option<ToastId>) -> ToastId {
        self.show(ToastKind::Success, message.into(), replace)
    }

    /// Show an error toast, replacing `replace` if it is still visible
    pub fn error(&mut self, message: impl Into<String>, replace: Option<ToastId>) -> ToastId {
        self.show(ToastKind::Error, message.into(), replace)
    }

    fn show(&mut self, kind: ToastKind, message: String, replace: Option<ToastId>) -> ToastId {
        if let Some(toast) = replace.and_then(|id| self.toasts.get_mut(&id)) {
            tracing::debug!("ToastQueue: {:?} {:?} -> {:?}", toast.id, toast.kind, kind);
            toast.kind = kind;
            toast.message = message;
            toast.shown_at_ms = self.now_ms;
            return toast.id;
        }

        self.next_id += 1;
        let id = ToastId(self.next_id);
        self.toasts.insert(
            id,
            Toast {
                id,
                kind,
                message,
                shown_at_ms: self.now_ms,
            },
        );
        id
    }

    pub fn dismiss(&mut self, id: ToastId) -> bool {
        self.toasts.shift_remove(&id).is_some()
    }

    /// Advance the clock and drop expired toasts
    pub fn tick(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
        self.toasts
            .retain(|_, toast| toast.expires_at_ms().map_or(true, |at| now_ms < at));
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.get(&id)
    }

    /// Visible toasts, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.values()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_replaced_in_place() {
        let mut toasts = ToastQueue::new();
        let other = toasts.success("Saved", None);
        let loading = toasts.loading("Sending your message...");

        let id = toasts.success("Message sent successfully!", Some(loading));
        assert_eq!(id, loading);
        assert_eq!(toasts.len(), 2);

        let order: Vec<_> = toasts.iter().map(|t| t.id).collect();
        assert_eq!(order, vec![other, loading]);
        assert_eq!(toasts.get(loading).unwrap().kind, ToastKind::Success);
    }

    #[test]
    fn test_replacing_a_dismissed_toast_adds_new() {
        let mut toasts = ToastQueue::new();
        let loading = toasts.loading("Sending");
        toasts.dismiss(loading);
        let id = toasts.error("Failed", Some(loading));
        assert_ne!(id, loading);
        assert_eq!(toasts.len(), 1);
    }

    #[test]
    fn test_expiry() {
        let mut toasts = ToastQueue::new();
        let loading = toasts.loading("Sending");
        let error = toasts.error("Failed", None);

        toasts.tick(ERROR_DURATION_MS - 1.0);
        assert!(toasts.get(error).is_some());

        toasts.tick(ERROR_DURATION_MS);
        assert!(toasts.get(error).is_none());
        // Loading toasts never expire
        toasts.tick(1_000_000.0);
        assert!(toasts.get(loading).is_some());
    }

    #[test]
    fn test_replacement_restarts_clock() {
        let mut toasts = ToastQueue::new();
        let loading = toasts.loading("Sending");
        toasts.tick(10_000.0);
        toasts.success("Sent", Some(loading));
        toasts.tick(10_000.0 + SUCCESS_DURATION_MS - 1.0);
        assert!(toasts.get(loading).is_some());
        toasts.tick(10_000.0 + SUCCESS_DURATION_MS);
        assert!(toasts.is_empty());
    }
}
