use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Concurrency bound {value} exceeds the maximum of {max}.")]
    ConcurrencyTooLarge { value: usize, max: usize },
    #[error("Invalid status range '{value}'. Expected a code (e.g. 200) or range (e.g. 200-399).")]
    InvalidStatusRange { value: String },
    #[error("Invalid status code in '{value}': {source}")]
    InvalidStatusCode {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Status code {code} is outside 100-999.")]
    StatusCodeOutOfRange { code: u16 },
    #[error("Status range '{value}' has start > end.")]
    StatusRangeStartAfterEnd { value: String },
    #[error("Success status list must not be empty.")]
    StatusPolicyEmpty,
    #[error("Cannot combine --hosts with --file.")]
    HostsAndFileConflict,
    #[error("Run was interrupted before all requests completed.")]
    Interrupted,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
