use crate::core::mapa::gerar_mapa_numerologico;
use crate::domain::model::MapaNumerologico;
use crate::utils::error::Result;
use crate::utils::validation::{parse_date, validate_birth_date, validate_name};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

#[derive(Debug, Deserialize)]
struct BatchRow {
    nome: String,
    data_nascimento: String,
    #[serde(default)]
    data_referencia: Option<String>,
}

#[derive(Debug, Serialize)]
struct BatchOutputRow {
    nome: String,
    data_nascimento: NaiveDate,
    motivacao: u32,
    impressao: u32,
    expressao: u32,
    destino: u32,
    missao: u32,
    ciclo_1: u32,
    ciclo_2: u32,
    ciclo_3: u32,
    desafio_1: u32,
    desafio_2: u32,
    desafio_principal: u32,
    ano_pessoal: Option<u32>,
    mes_pessoal: Option<u32>,
    dia_pessoal: Option<u32>,
}

impl From<MapaNumerologico> for BatchOutputRow {
    fn from(mapa: MapaNumerologico) -> Self {
        let pessoais = mapa.ciclos_pessoais;
        Self {
            nome: mapa.nome,
            data_nascimento: mapa.data_nascimento,
            motivacao: mapa.motivacao,
            impressao: mapa.impressao,
            expressao: mapa.expressao,
            destino: mapa.destino,
            missao: mapa.missao,
            ciclo_1: mapa.ciclos_vida.primeiro,
            ciclo_2: mapa.ciclos_vida.segundo,
            ciclo_3: mapa.ciclos_vida.terceiro,
            desafio_1: mapa.desafios.primeiro,
            desafio_2: mapa.desafios.segundo,
            desafio_principal: mapa.desafios.principal,
            ano_pessoal: pessoais.map(|p| p.ano_pessoal),
            mes_pessoal: pessoais.map(|p| p.mes_pessoal),
            dia_pessoal: pessoais.map(|p| p.dia_pessoal),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRejection {
    /// 1-based line in the input, header included.
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub rejections: Vec<BatchRejection>,
}

impl BatchSummary {
    pub fn rejected(&self) -> usize {
        self.rejections.len()
    }
}

fn start_line(position: Option<&csv::Position>) -> usize {
    position.map_or(0, |p| p.line() as usize)
}

/// Computes one map per CSV row; bad rows are reported, not fatal.
pub struct BatchRunner {
    today: NaiveDate,
}

impl BatchRunner {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    fn map_row(&self, row: BatchRow) -> Result<MapaNumerologico> {
        validate_name(&row.nome)?;
        let nascimento = parse_date("data_nascimento", &row.data_nascimento)?;
        validate_birth_date(nascimento, self.today)?;

        let referencia = match row.data_referencia.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Some(parse_date("data_referencia", value)?),
            _ => None,
        };

        gerar_mapa_numerologico(&row.nome, nascimento, referencia)
    }

    pub fn run<R: Read, W: Write>(&self, input: R, output: W) -> Result<BatchSummary> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
        let mut writer = csv::Writer::from_writer(output);
        let mut summary = BatchSummary::default();

        let headers = reader.headers()?.clone();

        for record in reader.records() {
            // line where the record starts, so quoted multi-line fields count
            let (line, outcome) = match record {
                Ok(record) => (
                    start_line(record.position()),
                    record
                        .deserialize::<BatchRow>(Some(&headers))
                        .map_err(Into::into)
                        .and_then(|row| self.map_row(row)),
                ),
                Err(e) => (start_line(e.position()), Err(e.into())),
            };

            match outcome {
                Ok(mapa) => {
                    writer.serialize(BatchOutputRow::from(mapa))?;
                    summary.processed += 1;
                }
                Err(e) => {
                    tracing::warn!("⚠️ Skipping line {}: {}", line, e);
                    summary.rejections.push(BatchRejection {
                        line,
                        reason: e.to_string(),
                    });
                }
            }
        }

        writer.flush()?;
        tracing::info!(
            "✅ Batch finished: {} maps, {} rejected rows",
            summary.processed,
            summary.rejected()
        );
        Ok(summary)
    }

    pub fn run_files(&self, input_path: &str, output_path: &str) -> Result<BatchSummary> {
        let input = std::fs::File::open(input_path)?;

        if let Some(parent) = std::path::Path::new(output_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let output = std::fs::File::create(output_path)?;

        self.run(input, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> BatchRunner {
        BatchRunner::new(NaiveDate::from_ymd_opt(2026, 10, 14).unwrap())
    }

    #[test]
    fn test_batch_computes_each_row() {
        let input = "nome,data_nascimento,data_referencia\n\
                     Ana Paula Souza,1988-03-10,\n\
                     Maria Silva,1990-05-15,2026-10-14\n";
        let mut output = Vec::new();

        let summary = runner().run(input.as_bytes(), &mut output).unwrap();
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.rejected(), 0);

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "nome,data_nascimento,motivacao,impressao,expressao,destino,missao,ciclo_1,ciclo_2,ciclo_3,desafio_1,desafio_2,desafio_principal,ano_pessoal,mes_pessoal,dia_pessoal"
        );
        assert_eq!(lines[1], "Ana Paula Souza,1988-03-10,8,6,5,3,8,3,1,8,2,7,5,,,");
        assert_eq!(lines[2], "Maria Silva,1990-05-15,3,3,6,3,9,5,6,1,1,5,4,3,4,9");
    }

    #[test]
    fn test_batch_without_reference_column() {
        let input = "nome,data_nascimento\nJosé,2000-01-01\n";
        let mut output = Vec::new();

        let summary = runner().run(input.as_bytes(), &mut output).unwrap();
        assert_eq!(summary.processed, 1);
    }

    #[test]
    fn test_batch_reports_bad_rows() {
        let input = "nome,data_nascimento\n\
                     123,1990-05-15\n\
                     Maria Silva,15/05/1990\n\
                     Antiga,1850-01-01\n\
                     Maria Silva,1990-05-15\n";
        let mut output = Vec::new();

        let summary = runner().run(input.as_bytes(), &mut output).unwrap();
        assert_eq!(summary.processed, 1);
        let lines: Vec<usize> = summary.rejections.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 3, 4]);
    }

    #[test]
    fn test_rejected_line_counts_multiline_fields() {
        let input = "nome,data_nascimento\n\
                     \"Ana\nPaula Souza\",1988-03-10\n\
                     Maria Silva,nunca\n";
        let mut output = Vec::new();

        let summary = runner().run(input.as_bytes(), &mut output).unwrap();
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.rejections.len(), 1);
        assert_eq!(summary.rejections[0].line, 4);
    }
}
