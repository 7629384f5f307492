use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn rotacalc_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("rotacalc"))
}

fn init_config(config_path: &std::path::Path) {
    rotacalc_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();
}

#[test]
fn test_help() {
    rotacalc_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "CLI route displacement and excess-distance calculator",
        ));
}

#[test]
fn test_version() {
    rotacalc_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rotacalc"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");

    rotacalc_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized rotacalc config"));

    // Check files were created
    assert!(config_path.join("config.toml").exists());
    assert!(config_path.join("template.txt").exists());
    assert!(config_path.join("device_id").exists());
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");

    // First init should succeed
    init_config(&config_path);

    // Second init should fail
    rotacalc_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_calc_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    rotacalc_cmd()
        .args(["-C", config_path.to_str().unwrap(), "calc", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_calc_displacement() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    init_config(&config_path);

    // The 40 KM allowance covers the 70 KM detour first, leaving the whole
    // service distance as provider excess.
    rotacalc_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "calc",
            "50",
            "--rota4",
            "120",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deslocamento:  30 KM"))
        .stdout(predicate::str::contains("KM Cobertura:  50 KM"));

    assert!(config_path.join("state.toml").exists());
}

#[test]
fn test_calc_comma_decimal() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    init_config(&config_path);

    rotacalc_cmd()
        .args(["-C", config_path.to_str().unwrap(), "calc", "52,3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("KM Cobertura:  12,3 KM"));
}

#[test]
fn test_calc_invalid_number() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    init_config(&config_path);

    rotacalc_cmd()
        .args(["-C", config_path.to_str().unwrap(), "calc", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value"));
}

#[test]
fn test_calc_client_excess_warning() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    init_config(&config_path);

    rotacalc_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "calc",
            "30",
            "--rota4",
            "50",
            "--cobertura",
            "10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Excedente Beneficiário: 20 KM"))
        .stdout(predicate::str::contains("Atenção"));
}

#[test]
fn test_price_requires_cost_input() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    init_config(&config_path);

    rotacalc_cmd()
        .args(["-C", config_path.to_str().unwrap(), "price"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No cost values supplied"));
}

#[test]
fn test_price_and_summary_flow() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    let cfg = config_path.to_str().unwrap();
    init_config(&config_path);

    rotacalc_cmd()
        .args([
            "-C", cfg, "calc", "30", "--rota4", "50", "--cobertura", "10",
        ])
        .assert()
        .success();

    // 20 KM excess at R$ 3,50/KM
    rotacalc_cmd()
        .args(["-C", cfg, "price", "--km", "3,50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R$ 70,00"));

    rotacalc_cmd()
        .args(["-C", cfg, "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resumo do Acionamento"))
        .stdout(predicate::str::contains("*Excedente Beneficiário: 20 KM*"))
        .stdout(predicate::str::contains("Valor por KM: R$ 3,50"))
        .stdout(predicate::str::contains("TOTAL BENEFICIÁRIO: R$ 70,00"));
}

#[test]
fn test_price_with_toll_and_extras() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    let cfg = config_path.to_str().unwrap();
    init_config(&config_path);

    rotacalc_cmd()
        .args([
            "-C", cfg, "calc", "30", "--rota4", "50", "--cobertura", "10",
        ])
        .assert()
        .success();

    rotacalc_cmd()
        .args([
            "-C",
            cfg,
            "price",
            "--km",
            "3,50",
            "--pedagio",
            "25",
            "--provider-pedagio",
            "15,00",
            "--extra",
            "Estadia:35,00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("R$ 95,00"));

    // Internal costs show in the summary but never change the billed total
    rotacalc_cmd()
        .args(["-C", cfg, "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pedágio: R$ 25,00"))
        .stdout(predicate::str::contains("Custos Internos"))
        .stdout(predicate::str::contains("- Pedágio: R$ 15,00"))
        .stdout(predicate::str::contains("- Estadia: R$ 35,00"))
        .stdout(predicate::str::contains("TOTAL BENEFICIÁRIO: R$ 95,00"));
}

#[test]
fn test_price_invalid_extra_format() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    let cfg = config_path.to_str().unwrap();
    init_config(&config_path);

    rotacalc_cmd()
        .args(["-C", cfg, "calc", "50"])
        .assert()
        .success();

    rotacalc_cmd()
        .args(["-C", cfg, "price", "--extra", "sem-valor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid extra cost"));
}

#[test]
fn test_remove_costs() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    let cfg = config_path.to_str().unwrap();
    init_config(&config_path);

    rotacalc_cmd()
        .args(["-C", cfg, "calc", "50", "--cobertura", "30"])
        .assert()
        .success();

    rotacalc_cmd()
        .args(["-C", cfg, "price", "--km", "2,00"])
        .assert()
        .success();

    rotacalc_cmd()
        .args(["-C", cfg, "remove-costs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed costs"));

    // Nothing left to remove
    rotacalc_cmd()
        .args(["-C", cfg, "remove-costs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no cost details"));
}

#[test]
fn test_list_empty() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    init_config(&config_path);

    rotacalc_cmd()
        .args(["-C", config_path.to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No calculations stored yet."));
}

#[test]
fn test_list_shows_entries() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    let cfg = config_path.to_str().unwrap();
    init_config(&config_path);

    rotacalc_cmd()
        .args(["-C", cfg, "calc", "50", "--rota4", "120"])
        .assert()
        .success();

    rotacalc_cmd()
        .args(["-C", cfg, "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ROTA 3"))
        .stdout(predicate::str::contains("50 KM"))
        .stdout(predicate::str::contains("Total: 1 calculations"));
}

#[test]
fn test_list_invalid_period() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    init_config(&config_path);

    rotacalc_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "list",
            "--period",
            "yesterday",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --period"));
}

#[test]
fn test_stats() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    let cfg = config_path.to_str().unwrap();
    init_config(&config_path);

    rotacalc_cmd()
        .args([
            "-C", cfg, "calc", "30", "--rota4", "50", "--cobertura", "10",
        ])
        .assert()
        .success();

    rotacalc_cmd()
        .args(["-C", cfg, "price", "--km", "3,50"])
        .assert()
        .success();

    rotacalc_cmd()
        .args(["-C", cfg, "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Calculations:    1"))
        .stdout(predicate::str::contains("Excedente total: 20,0 KM"))
        .stdout(predicate::str::contains("R$ 70,00"));
}

#[test]
fn test_export_csv() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    let cfg = config_path.to_str().unwrap();
    init_config(&config_path);

    rotacalc_cmd()
        .args([
            "-C", cfg, "calc", "30", "--rota4", "50", "--cobertura", "10",
        ])
        .assert()
        .success();

    rotacalc_cmd()
        .args(["-C", cfg, "export"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Data;R3 (KM);R4 (KM);Cobertura (KM);Excedente (KM);Total (R$)",
        ))
        .stdout(predicate::str::contains(";30;50;10;20;0"));
}

#[test]
fn test_export_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    let cfg = config_path.to_str().unwrap();
    init_config(&config_path);

    rotacalc_cmd()
        .args(["-C", cfg, "calc", "60"])
        .assert()
        .success();

    let out_path = temp_dir.path().join("history.csv");
    rotacalc_cmd()
        .args(["-C", cfg, "export", "-o", out_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 calculations"));

    let csv = fs::read_to_string(&out_path).unwrap();
    assert!(csv.contains(";60;-;Ilimitada;0;0"));
}

#[test]
fn test_delete_entry() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    let cfg = config_path.to_str().unwrap();
    init_config(&config_path);

    rotacalc_cmd()
        .args(["-C", cfg, "calc", "50"])
        .assert()
        .success();

    rotacalc_cmd()
        .args(["-C", cfg, "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted calculation"));

    rotacalc_cmd()
        .args(["-C", cfg, "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No calculations stored yet."));
}

#[test]
fn test_delete_invalid_index() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    let cfg = config_path.to_str().unwrap();
    init_config(&config_path);

    rotacalc_cmd()
        .args(["-C", cfg, "calc", "50"])
        .assert()
        .success();

    rotacalc_cmd()
        .args(["-C", cfg, "delete", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid entry index"));
}

#[test]
fn test_clear() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    let cfg = config_path.to_str().unwrap();
    init_config(&config_path);

    rotacalc_cmd()
        .args(["-C", cfg, "calc", "50"])
        .assert()
        .success();
    rotacalc_cmd()
        .args(["-C", cfg, "calc", "60"])
        .assert()
        .success();

    rotacalc_cmd()
        .args(["-C", cfg, "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 2 calculations"));
}

#[test]
fn test_summary_empty_history() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    init_config(&config_path);

    rotacalc_cmd()
        .args(["-C", config_path.to_str().unwrap(), "summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid entry index"));
}

#[test]
fn test_template_show_default() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    init_config(&config_path);

    rotacalc_cmd()
        .args(["-C", config_path.to_str().unwrap(), "template", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resumo do Acionamento"));
}

#[test]
fn test_template_set_and_reset() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    let cfg = config_path.to_str().unwrap();
    init_config(&config_path);

    let custom_path = temp_dir.path().join("custom.txt");
    fs::write(&custom_path, "Rota: {{r3}} KM").unwrap();

    rotacalc_cmd()
        .args(["-C", cfg, "template", "set", custom_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved summary template"));

    rotacalc_cmd()
        .args(["-C", cfg, "template", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rota: {{r3}} KM"));

    rotacalc_cmd()
        .args(["-C", cfg, "template", "reset"])
        .assert()
        .success();

    rotacalc_cmd()
        .args(["-C", cfg, "template", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resumo do Acionamento"));
}

#[test]
fn test_custom_template_drives_summary() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    let cfg = config_path.to_str().unwrap();
    init_config(&config_path);

    let custom_path = temp_dir.path().join("custom.txt");
    fs::write(
        &custom_path,
        "R3={{r3}}{{#if excedente_cliente}} EXC={{excedente_cliente}}{{/if}}",
    )
    .unwrap();

    rotacalc_cmd()
        .args(["-C", cfg, "template", "set", custom_path.to_str().unwrap()])
        .assert()
        .success();

    rotacalc_cmd()
        .args(["-C", cfg, "calc", "50"])
        .assert()
        .success();

    // No client excess, so the conditional block disappears
    rotacalc_cmd()
        .args(["-C", cfg, "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R3=50"))
        .stdout(predicate::str::contains("EXC").not());
}

#[test]
fn test_sync_requires_remote() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    init_config(&config_path);

    rotacalc_cmd()
        .args(["-C", config_path.to_str().unwrap(), "sync"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Remote sync is disabled"));
}

#[test]
fn test_template_pull_requires_remote() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    init_config(&config_path);

    rotacalc_cmd()
        .args(["-C", config_path.to_str().unwrap(), "template", "pull"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Remote sync is disabled"));
}

#[test]
fn test_weather_not_configured() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rotacalc-config");
    init_config(&config_path);

    rotacalc_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "weather",
            "--lat",
            "-23.55",
            "--lon",
            "-46.63",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("not configured"));
}
