pub mod ban;
pub mod report;
pub mod user;

pub use ban::{Ban, BanOption, CreateBanInput};
pub use report::{CreateReportInput, DecisionAction, Report, ReportStatus, ReviewSnapshot};
pub use user::UserRecord;
