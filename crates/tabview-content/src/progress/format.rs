//! Human-readable sizes, rates and durations for the progress display.

const KB: u64 = 1024;
const MB: u64 = 1024 * 1024;
const GB: u64 = 1024 * 1024 * 1024;

/// Format a byte count (or a rate with `per_second`) with `precision`
/// decimals above one kilobyte.
pub fn format_unit(value: u64, per_second: bool, precision: usize) -> String {
    let suffix = if per_second { "/s" } else { "" };
    let (scaled, unit) = if value > GB {
        (value as f64 / GB as f64, "GB")
    } else if value > MB {
        (value as f64 / MB as f64, "MB")
    } else if value > KB {
        (value as f64 / KB as f64, "KB")
    } else {
        return format!("{value} B{suffix}");
    };
    format!("{scaled:.precision$} {unit}{suffix}")
}

/// `minutes:seconds` with seconds zero-padded; minutes are not wrapped.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_formatting() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(9), "0:09");
        assert_eq!(format_elapsed(65), "1:05");
        assert_eq!(format_elapsed(599), "9:59");
        assert_eq!(format_elapsed(3600), "60:00");
    }

    #[test]
    fn small_values_stay_in_bytes() {
        assert_eq!(format_unit(0, false, 1), "0 B");
        assert_eq!(format_unit(1024, false, 1), "1024 B");
        assert_eq!(format_unit(512, true, 1), "512 B/s");
    }

    #[test]
    fn larger_values_scale_up() {
        assert_eq!(format_unit(2048, false, 1), "2.0 KB");
        assert_eq!(format_unit(1536, true, 1), "1.5 KB/s");
        assert_eq!(format_unit(5 * MB, false, 1), "5.0 MB");
        assert_eq!(format_unit(3 * GB, true, 2), "3.00 GB/s");
    }

    #[test]
    fn unit_boundaries_are_exclusive() {
        assert_eq!(format_unit(MB, false, 1), "1024.0 KB");
        assert_eq!(format_unit(GB, false, 1), "1024.0 MB");
    }
}
