mod common;
pub use self::common::Query;

mod history;
pub use self::history::HistoryQuery;

mod profile;
pub use self::profile::ProfileQuery;
