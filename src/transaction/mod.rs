mod callbacks;
mod executor;

pub use callbacks::{
    CallbackSet, ErrorFn, QueryDataFn, QueryErrorAction, QueryErrorFn, SuccessFn,
    TransactionCallbacks,
};
pub use executor::TransactionExecutor;
