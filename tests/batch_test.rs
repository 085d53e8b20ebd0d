use chrono::NaiveDate;
use numerologia::BatchRunner;
use tempfile::TempDir;

#[test]
fn test_batch_files_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("pessoas.csv");
    let output_path = temp_dir.path().join("saida").join("mapas.csv");

    std::fs::write(
        &input_path,
        "nome,data_nascimento,data_referencia\n\
         Ana Paula Souza,1988-03-10,2026-10-14\n\
         ,1990-05-15,\n\
         Maria Silva,1990-05-15,\n",
    )
    .unwrap();

    let runner = BatchRunner::new(NaiveDate::from_ymd_opt(2026, 10, 14).unwrap());
    let summary = runner
        .run_files(input_path.to_str().unwrap(), output_path.to_str().unwrap())
        .unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.rejected(), 1);
    assert_eq!(summary.rejections[0].line, 3);

    let mut reader = csv::Reader::from_path(&output_path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "Ana Paula Souza");
    // 10 + 3 + 2026 = 2039 -> 14 -> 5
    assert_eq!(&rows[0][13], "5");
    assert_eq!(&rows[1][0], "Maria Silva");
    assert_eq!(&rows[1][13], "");
}

#[test]
fn test_missing_input_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let runner = BatchRunner::new(NaiveDate::from_ymd_opt(2026, 10, 14).unwrap());
    let err = runner
        .run_files(
            temp_dir.path().join("nao_existe.csv").to_str().unwrap(),
            temp_dir.path().join("saida.csv").to_str().unwrap(),
        )
        .unwrap_err();
    assert!(matches!(err, numerologia::NumerologiaError::IoError(_)));
}
