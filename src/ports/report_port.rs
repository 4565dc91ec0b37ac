//! Dashboard presentation port trait.

use crate::domain::dashboard::DashboardView;
use crate::domain::error::DashboardError;

/// Port for rendering a computed dashboard to a file.
pub trait DashboardPort {
    fn render(&self, view: &DashboardView, output_path: &str) -> Result<(), DashboardError>;
}
