/// Application name
pub const APP_NAME: &str = "Loandesk";

/// Page size used when a screen does not configure one
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Upper bound for a configurable page size
pub const MAX_ITEMS_PER_PAGE: usize = 500;

/// Width of the zero-padded counter in sequential record ids (`branch-0007`)
pub const ID_COUNTER_WIDTH: usize = 4;

/// Separator between an id namespace and its suffix
pub const ID_SEPARATOR: char = '-';

/// Currency symbol used by the report views (Indian rupee)
pub const CURRENCY_SYMBOL: &str = "\u{20b9}";

/// Priority bounds shared by action codes and workflows
pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 5;

/// Indian postal index numbers are always six digits
pub const PIN_CODE_LEN: usize = 6;

/// Largest amount a single loan application may request, in whole rupees
/// (one lakh crore). Keeps amounts exact as `f64` sort keys.
pub const MAX_LOAN_AMOUNT: u64 = 1_000_000_000_000;
