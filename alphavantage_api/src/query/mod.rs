mod common;
pub use self::common::{OutputSize, Query, QueryCommon};

mod daily;
pub use self::daily::DailySeriesQuery;
