// tests/common/mod.rs

//! Shared fixture builders for integration tests.

use std::fs::File;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use zip::write::FileOptions;
use zip::ZipWriter;

/// Write a jar with the given entries, in order.
pub fn make_jar(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).unwrap();
    let mut writer = ZipWriter::new(file);
    for (name, content) in entries {
        writer.start_file(*name, FileOptions::default()).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap();
}

/// Read back every entry of a jar as (name, content) pairs, in order.
pub fn read_entries(path: &Path) -> Vec<(String, Vec<u8>)> {
    use std::io::Read;

    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entries = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).unwrap();
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        entries.push((entry.name().to_string(), content));
    }
    entries
}

/// Write an executable shell script standing in for an external tool.
///
/// The pipeline always invokes tools as `<java> -jar <tool.jar> <args...>`,
/// so a script substituted for java sees the tool jar as `$2` and the tool's
/// own arguments from `$3` on.
pub fn fake_tool(path: &Path, body: &str) {
    let mut file = File::create(path).unwrap();
    writeln!(file, "#!/bin/sh").unwrap();
    writeln!(file, "{body}").unwrap();
    drop(file);

    let mut perms = std::fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).unwrap();
}
