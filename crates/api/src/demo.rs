//! Demo sheet served when no database is configured.

use chrono::{Duration, Utc};
use common::CellValue;
use sheet_store::{InMemorySheetSource, RawTable};

/// Column titles as the inspection form writes them.
pub const FORM_HEADERS: [&str; 12] = [
    "Carimbo de data/hora",
    "Nome do Operador",
    "Status Geral da Empilhadeira",
    "Sistema Elétrico",
    "Sistema Hidráulico",
    "Freios",
    "Luzes",
    "Garfos",
    "Bateria",
    "Pneus",
    "Estrutura",
    "Observações",
];

const SUBMISSIONS: [(&str, &str, [&str; 8], &str); 4] = [
    (
        "Carlos Silva",
        "aprovado",
        ["Conforme", "Conforme", "Conforme", "Conforme", "Conforme", "Conforme", "Conforme", "Conforme"],
        "",
    ),
    (
        "Marina Souza",
        "aprovado",
        ["Conforme", "Conforme", "Conforme", "Não conforme", "Conforme", "OK", "Conforme", "Conforme"],
        "Lâmpada traseira queimada",
    ),
    (
        "João Pereira",
        "reprovado",
        ["Conforme", "Não conforme", "Não conforme", "Conforme", "Conforme", "Ruim", "Conforme", "Conforme"],
        "Vazamento no cilindro e freio com defeito",
    ),
    (
        "Carlos Silva",
        "aprovado",
        ["Conforme", "Conforme", "OK", "Conforme", "Conforme", "Conforme", "Conforme", "Conforme"],
        "",
    ),
];

/// A form table with a handful of submissions, the newest one hour ago.
pub fn demo_table() -> RawTable {
    let mut table = RawTable::with_headers(FORM_HEADERS);
    let newest = Utc::now() - Duration::hours(1);
    let count = SUBMISSIONS.len() as i64;

    for (i, (operator, status, answers, notes)) in SUBMISSIONS.iter().enumerate() {
        let submitted = newest - Duration::hours(8 * (count - 1 - i as i64));
        let mut row = vec![
            CellValue::Date(submitted),
            CellValue::text(*operator),
            CellValue::text(*status),
        ];
        row.extend(answers.iter().map(|a| CellValue::text(*a)));
        row.push(CellValue::text(*notes));
        table.push_row(row);
    }
    table
}

/// An in-memory source holding [`demo_table`] under `sheet_name`.
pub async fn demo_source(sheet_name: &str) -> InMemorySheetSource {
    let source = InMemorySheetSource::new();
    source.insert_sheet(sheet_name, demo_table()).await;
    source
}
