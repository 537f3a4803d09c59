use crate::error::{PolyxError, PolyxResult};
use std::{
    fmt::{Binary, Display},
    sync::Once,
};

pub type Result<T> = PolyxResult<T>;

#[allow(unused)]
static INIT_LOG: Once = Once::new();

#[allow(unused)]
pub fn init_logger() {
    INIT_LOG.call_once(|| {
        env_logger::builder()
            .filter_level(log::LevelFilter::Trace)
            .is_test(true)
            .init();
    });
}

pub fn handle_error_and_exit(err: PolyxError) -> ! {
    log::error!("{err}");
    std::process::exit(err.exit_code());
}

pub fn to_info_i32(value: u32, label: &str) -> Result<i32> {
    i32::try_from(value).map_err(|_| {
        crate::polyx_error!(
            "Cannot write {label}={value} to INFO as i32: value is outside supported range"
        )
    })
}

pub fn format_number_with_commas<T>(n: T) -> String
where
    T: Display + Binary,
{
    let s = n.to_string();
    let (sign, digits) = s.strip_prefix('-').map_or(("", s.as_str()), |d| ("-", d));

    if let 0..=3 = digits.len() {
        return s;
    }

    let mut result = String::with_capacity(digits.len() + (digits.len() - 1) / 3 + sign.len());
    for (digit_count, c) in digits.chars().rev().enumerate() {
        if digit_count > 0 && digit_count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result = result.chars().rev().collect();
    if !sign.is_empty() {
        result.insert_str(0, sign);
    }

    result
}
