mod lazy;
mod result_set;
mod row;

pub use lazy::LazyResultView;
pub use result_set::ResultSet;
pub use row::Row;
