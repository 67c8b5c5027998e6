//! End-to-end tests for the `fatura` binary against plain-text inputs.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn danf3e_invoice_text() -> String {
    [
        "RGE SUL DISTRIBUIDORA DE ENERGIA S.A.",
        "Inscrição no CNPJ: 02.016.440/0001-62",
        "ADRIANO DA SILVA",
        "R BENTO GONCALVES 1234",
        "CENTRO",
        "98700-000 IJUI RS",
        "TENSÃO NOMINAL EM VOLTS Disp.: 220",
        "Pelo CPF: 123.456.789-01",
        "CPF: 123.456.789-01",
        "UC: 0012345678",
        "Classificação: B1 Residencial Tipo de Fornecimento: Monofásico",
        "",
    ]
    .join("\n")
}

fn write_invoice(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("fatura.txt");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(danf3e_invoice_text().as_bytes()).unwrap();
    path
}

#[test]
fn process_text_invoice_emits_json_record() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_invoice(&dir);

    Command::cargo_bin("fatura")
        .unwrap()
        .args(["process", input.to_str().unwrap(), "--distributor", "rge", "--text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ADRIANO DA SILVA"))
        .stdout(predicate::str::contains("\"city_state\": \"IJUI - RS\""));
}

#[test]
fn process_with_sizing_flags_includes_engineering_params() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_invoice(&dir);

    Command::cargo_bin("fatura")
        .unwrap()
        .args([
            "process",
            input.to_str().unwrap(),
            "--distributor",
            "rge",
            "--text",
            "--category",
            "T3",
            "--inverters",
            "1",
            "--inverter-power",
            "5,0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"engineering\""))
        .stdout(predicate::str::contains("ac_breaker_a"));
}

#[test]
fn unknown_distributor_fails_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_invoice(&dir);

    Command::cargo_bin("fatura")
        .unwrap()
        .args(["process", input.to_str().unwrap(), "--distributor", "copel", "--text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown distributor"));
}

#[test]
fn missing_input_file_fails() {
    Command::cargo_bin("fatura")
        .unwrap()
        .args(["process", "/nonexistent/fatura.pdf", "--distributor", "rge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn batch_processes_matching_text_files() {
    let dir = tempfile::tempdir().unwrap();
    write_invoice(&dir);
    let pattern = dir.path().join("*.txt");
    let out = dir.path().join("records.jsonl");

    Command::cargo_bin("fatura")
        .unwrap()
        .args([
            "batch",
            pattern.to_str().unwrap(),
            "--distributor",
            "rge",
            "--text",
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 ok"));

    let records = std::fs::read_to_string(&out).unwrap();
    assert!(records.contains("ADRIANO DA SILVA"));
}
