use std::fmt;

/// Logging handle for one form validation pass.
///
/// Every event carries the request ID and form name so a host's subscriber
/// can correlate field-level events with the request that produced them.
/// Token values never reach the log; they are only ever held as
/// [`Secret`](crate::Secret).
#[derive(Debug, Clone, Copy)]
pub(crate) struct ValidationLog<'a> {
    request_id: &'a str,
    form: &'a str,
}

impl<'a> ValidationLog<'a> {
    pub(crate) fn new(request_id: &'a str, form: &'a str) -> Self {
        Self { request_id, form }
    }

    pub(crate) fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(request_id = %self.request_id, form = %self.form, "{}", args);
    }

    pub(crate) fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(request_id = %self.request_id, form = %self.form, "{}", args);
    }

    pub(crate) fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(request_id = %self.request_id, form = %self.form, "{}", args);
    }
}
