pub mod encoding;
pub mod money;
pub mod wrapper;

pub use encoding::to_win_ansi;
pub use money::{currency_symbol, format_amount, format_money};
pub use wrapper::wrap;
