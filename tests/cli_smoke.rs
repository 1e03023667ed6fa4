use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn kb_help_works() {
    Command::cargo_bin("kb")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Kanban Board"));
}

#[test]
fn subcommand_help_works() {
    let subcommands = ["board", "list", "add", "move", "rm", "tags", "tag-add", "health"];

    for cmd in subcommands {
        Command::cargo_bin("kb")
            .expect("binary")
            .arg(cmd)
            .arg("--help")
            .assert()
            .success();
    }
}

#[test]
fn move_rejects_unknown_columns() {
    Command::cargo_bin("kb")
        .expect("binary")
        .args(["move", "1", "archive"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("unknown column"));
}
