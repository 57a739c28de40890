#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Writes an executable shell script standing in for a vendor binary.
#[cfg(unix)]
pub fn fake_binary(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Writes a client config pointing at `request` and `response`.
pub fn write_config(dir: &Path, request: &Path, response: &Path, extra: &str) -> PathBuf {
    let path = dir.join("sips.json");
    let json = format!(
        r#"{{
            "merchant_id": "014295303911111",
            "country": "fr",
            "pathfile": "/etc/sips/pathfile",
            "request_path": "{}",
            "response_path": "{}"{extra}
        }}"#,
        request.display(),
        response.display(),
    );
    fs::write(&path, json).unwrap();
    path
}
