/// Visual severity of a snackbar notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    #[default]
    Info,
    Warning,
}

/// The single transient notification slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SnackbarState {
    pub open: bool,
    pub severity: Severity,
    pub msg: String,
}
