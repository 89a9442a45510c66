//! Bandwidth Units - Data rate conversion
//!
//! Converts a value entered in any of twelve speed units into all the others.
//! Every conversion goes through bits per second.
//!
//! Units:
//! - Bit family: bit/s, Kbit/s, Mbit/s, Gbit/s, Tbit/s, Pbit/s
//! - Byte family: B/s, KB/s, MB/s, GB/s, TB/s, PB/s
//!
//! All prefixes are decimal (kilo = 10^3). One byte is eight bits.

mod unit;
mod units;
mod parse;
mod format;
mod convert;
mod session;

pub use unit::{SpeedUnit, Family, UnknownUnit};
pub use units::{UNITS, UnitRegistry, bit_units, byte_units};
pub use parse::{parse, parse_unit, is_valid_char, accepts_insertion, BACKSPACE};
pub use format::format;
pub use convert::{Conversions, convert, convert_between, convert_formatted, to_bits_per_second, from_bits_per_second};
pub use session::{Session, Outcome};

pub use bandwidth_core::{Precision, InputError, ErrorKind};
