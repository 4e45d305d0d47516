pub mod kutipan;
pub mod tabung;
pub mod tabung_type;

pub use kutipan::{Denominations, Kutipan, KutipanInput};
pub use tabung::{Tabung, TabungInput};
pub use tabung_type::{TabungType, TabungTypeInput};
