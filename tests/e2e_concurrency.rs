mod common;
use common::cli::{YconfWorkspace, read, run_yconf, run_yconf_stdin};
use std::thread;

const WRITERS: usize = 8;

fn payload(writer: usize) -> String {
    let mut doc = format!("writer: {writer}\nbody:\n");
    for i in 0..300 {
        doc.push_str(&format!("  - {writer}-{i}\n"));
    }
    doc
}

#[test]
fn test_parallel_write_processes_leave_one_whole_document() {
    let workspace = YconfWorkspace::new();
    let payloads: Vec<String> = (0..WRITERS).map(payload).collect();

    thread::scope(|scope| {
        for (writer, doc) in payloads.iter().enumerate() {
            let workspace = &workspace;
            scope.spawn(move || {
                for round in 0..3 {
                    let label = format!("write_{writer}_{round}");
                    let out = run_yconf_stdin(workspace, ["write"], doc, &label);
                    assert!(out.status.success(), "{label}: {}", out.stderr);
                }
            });
        }

        // Readers in their own processes see nothing or a complete document.
        let workspace = &workspace;
        let payloads = &payloads;
        scope.spawn(move || {
            for round in 0..10 {
                let out = run_yconf(workspace, ["data"], &format!("data_{round}"));
                assert!(out.status.success());
                assert!(
                    out.stdout == "\n" || payloads.contains(&out.stdout),
                    "torn read: {:?}",
                    out.stdout
                );
            }
        });
    });

    let final_doc = read(&workspace.config_file());
    assert!(payloads.contains(&final_doc), "final document is not one payload");

    let writer = run_yconf(&workspace, ["query", ".writer"], "query_writer");
    let writer: usize = writer.stdout.trim().parse().unwrap();
    assert_eq!(final_doc, payload(writer));
    assert_eq!(
        run_yconf(&workspace, ["query", ".body | length"], "query_len").stdout,
        "300\n"
    );
}
