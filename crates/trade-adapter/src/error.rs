use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Invalid adapter settings: {0}")]
    InvalidSettings(String),

    #[error("Trade '{trade_id}' failed record construction: {source}")]
    Construction {
        trade_id: String,
        #[source]
        source: CoreError,
    },

    #[error("Currency conversion overflowed for trade '{trade_id}' ({field})")]
    Conversion {
        trade_id: String,
        field: &'static str,
    },
}
