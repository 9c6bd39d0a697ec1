//! Stub transcoder binary for integration tests
//!
//! Real ffmpeg is not assumed on test machines; the stub honors the same
//! argument-vector contract (`-i <input> ... <output>`) by copying the
//! input to the output path.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

const STUB_SCRIPT: &str = r#"#!/bin/sh
in=""
out=""
prev=""
for a in "$@"; do
  if [ "$prev" = "-i" ]; then in="$a"; fi
  prev="$a"
  out="$a"
done
if [ "$1" = "-version" ]; then
  echo "stub transcoder"
  exit 0
fi
cp "$in" "$out"
"#;

/// Write an executable stub transcoder into `dir` and return its path
pub fn install_stub(dir: &Path) -> PathBuf {
    let path = dir.join("stub-transcoder");
    std::fs::write(&path, STUB_SCRIPT).expect("write stub transcoder");

    let mut perms = std::fs::metadata(&path).expect("stat stub transcoder").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("chmod stub transcoder");

    path
}
