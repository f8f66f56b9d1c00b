/// Health classification returned to the monitoring supervisor
///
/// Discriminants follow the Nagios plugin convention and double as the
/// process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Verdict {
    Ok = 0,
    Warning = 1,
    Critical = 2,
    Unknown = 3,
}

impl Verdict {
    pub const fn exit_code(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_exit_codes_follow_plugin_convention() {
        assert_eq!(Verdict::Ok.exit_code(), 0);
        assert_eq!(Verdict::Warning.exit_code(), 1);
        assert_eq!(Verdict::Critical.exit_code(), 2);
        assert_eq!(Verdict::Unknown.exit_code(), 3);
    }

    #[test]
    fn test_labels_are_uppercase() {
        let labels: Vec<String> = Verdict::iter().map(|v| v.to_string()).collect();
        assert_eq!(labels, ["OK", "WARNING", "CRITICAL", "UNKNOWN"]);
    }
}
