use crate::Stage;

/// What the status line shows next to the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountDisplay {
    /// A read or count is in flight (or nothing has been dropped yet).
    #[default]
    Pending,
    Counted { count: u64, is_estimate: bool },
    /// The last attempt failed; the error line carries the reason.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub models: Vec<ModelRowView>,
    pub selected_model: String,
    pub file_name: Option<String>,
    pub stage: Stage,
    pub count: CountDisplay,
    pub error: Option<String>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn token_count(&self) -> Option<u64> {
        match self.count {
            CountDisplay::Counted { count, .. } => Some(count),
            _ => None,
        }
    }

    pub fn is_estimate(&self) -> bool {
        matches!(
            self.count,
            CountDisplay::Counted {
                is_estimate: true,
                ..
            }
        )
    }

    pub fn selected_row(&self) -> Option<usize> {
        self.models.iter().position(|row| row.selected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRowView {
    pub label: String,
    pub value: String,
    pub group: String,
    pub exact: bool,
    pub selected: bool,
}
