mod meta;
pub use self::meta::MetaData;

mod series;
pub use self::series::{DailyBar, DailySeriesResponse};
