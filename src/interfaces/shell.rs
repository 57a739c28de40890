use crate::domain::parameters::RequestParameters;
use std::path::Path;

/// Quotes a value so a POSIX shell reads it back as one literal word.
///
/// The value is wrapped in single quotes; embedded single quotes become `'\''`.
pub fn escape_arg(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('\'');
    for c in value.chars() {
        if c == '\'' {
            escaped.push_str("'\\''");
        } else {
            escaped.push(c);
        }
    }
    escaped.push('\'');
    escaped
}

/// Renders parameters as `name='value'` words joined by single spaces.
pub fn encode_parameters(params: &RequestParameters) -> String {
    params
        .iter()
        .map(|(name, value)| format!("{name}={}", escape_arg(value)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full command line for `binary`, as a shell would be given it.
pub fn command_line(binary: &Path, params: &RequestParameters) -> String {
    let binary = binary.display().to_string();
    if params.is_empty() {
        binary
    } else {
        format!("{binary} {}", encode_parameters(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_value() {
        assert_eq!(escape_arg("978"), "'978'");
        assert_eq!(escape_arg(""), "''");
    }

    #[test]
    fn test_escape_single_quote() {
        assert_eq!(escape_arg("l'ordre"), "'l'\\''ordre'");
    }

    #[test]
    fn test_command_line() {
        let params = RequestParameters::new()
            .with("pathfile", "/etc/sips/pathfile")
            .with("message", "a b");
        assert_eq!(
            command_line(Path::new("/opt/sips/response"), &params),
            "/opt/sips/response pathfile='/etc/sips/pathfile' message='a b'"
        );
        assert_eq!(
            command_line(Path::new("/opt/sips/request"), &RequestParameters::new()),
            "/opt/sips/request"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_reads_back_original_value() {
        let values = [
            "plain",
            "two words",
            "it's",
            "$(rm -rf /); `id` && echo $HOME | cat > x",
            "back\\slash \"quoted\" 'single' *.rs ~ !bang",
            "",
        ];

        for value in values {
            let script = format!("printf '%s' {}", escape_arg(value));
            let output = std::process::Command::new("sh")
                .arg("-c")
                .arg(&script)
                .output()
                .unwrap();
            assert_eq!(String::from_utf8(output.stdout).unwrap(), value);
        }
    }
}
