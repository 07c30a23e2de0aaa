//! Setting value validation.

use std::net::IpAddr;

/// Largest request body the server will agree to buffer (1 GiB).
const MAX_UPLOAD_CEILING: usize = 1 << 30;

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "BIND_ADDRESS" => {
            value
                .parse::<IpAddr>()
                .map_err(|_| "must be an IPv4 or IPv6 address")?;
        }
        "SERVER_PORT" => {
            let v: u16 = value.parse().map_err(|_| "must be an integer port")?;
            if v == 0 {
                return Err("must be between 1 and 65535".into());
            }
        }
        "MAX_UPLOAD_BYTES" => {
            let v: usize = value.parse().map_err(|_| "must be an integer")?;
            if !(1024..=MAX_UPLOAD_CEILING).contains(&v) {
                return Err(format!(
                    "must be between 1024 and {MAX_UPLOAD_CEILING} bytes"
                ));
            }
        }
        _ => {}
    }
    Ok(())
}
