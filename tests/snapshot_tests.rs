use std::fs;
use std::path::PathBuf;

use insta::assert_debug_snapshot;
use proctop::system::catalog::build_catalog;
use proctop::system::process::stat_line;
use proctop::system::rank::{SortMode, rank};
use proctop::system::reader::ProcReader;

struct FixtureRoot(PathBuf);

impl FixtureRoot {
    fn new(tag: &str) -> Self {
        let root = std::env::temp_dir().join(format!("proctop-it-{tag}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).unwrap();
        FixtureRoot(root)
    }

    fn write(&self, rel: &str, contents: &[u8]) {
        let path = self.0.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn process(&self, pid: u32, name: &str, state: char, rss_pages: u64, argv: &[u8], uid: u32) {
        let stat = stat_line(pid, name, state, rss_pages) + "\n";
        self.write(&format!("{pid}/stat"), stat.as_bytes());
        self.write(&format!("{pid}/cmdline"), argv);
        self.write(
            &format!("{pid}/status"),
            format!("Name:\t{name}\nUid:\t{uid}\t{uid}\t{uid}\t{uid}\n").as_bytes(),
        );
    }
}

impl Drop for FixtureRoot {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn named_users(uid: u32) -> Option<String> {
    match uid {
        0 => Some("root".to_string()),
        1000 => Some("alice".to_string()),
        _ => None,
    }
}

#[test]
fn meminfo_fixture_parses() {
    let fixture = FixtureRoot::new("meminfo");
    fixture.write(
        "meminfo",
        b"MemTotal:       16384000 kB\nMemFree:         2000000 kB\nMemAvailable:    8000000 kB\nBuffers:          204800 kB\nCached:          4096000 kB\n",
    );

    let memory = ProcReader::new(&fixture.0).read_memory_sample();
    assert_debug_snapshot!("meminfo_sample", memory);
}

#[test]
fn ranked_catalog_from_fixture() {
    let fixture = FixtureRoot::new("catalog");
    fixture.process(1, "systemd", 'S', 3000, b"/sbin/init\0splash\0", 0);
    fixture.process(2, "kthreadd", 'S', 0, b"", 0);
    fixture.process(12, "my proc", 'R', 250, b"", 1000);
    fixture.process(873, "web (worker)", 'S', 12000, b"", 4242);
    fixture.process(900, "zombie", 'Z', 0, b"", 1000);
    fixture.write("self/stat", b"not a process\n");

    let reader = ProcReader::new(&fixture.0)
        .with_page_size(4096)
        .with_user_lookup(named_users);
    let ids = reader.list_live_process_ids();
    let catalog = build_catalog(&reader, &ids, 16_384_000);
    let rows: Vec<(u32, String, String, char, u64)> = rank(catalog, SortMode::Memory)
        .into_iter()
        .map(|p| (p.pid, p.user, p.command, p.state, p.resident_kb))
        .collect();

    assert_debug_snapshot!("ranked_catalog", rows);
}
