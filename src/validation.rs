//! Contract checks applied to `POST /predict` bodies before a run is produced.

use common::{PredictRequest, TargetSet};
use thiserror::Error;
use wizard::{AbcClass, ForecastModel, catalog};

pub const MAX_PERIODS: u32 = 60;

#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("periods deve estar entre 1 e 60 (recebido {0})")]
    Periods(u32),
    #[error("preview_rows deve ser maior que zero")]
    PreviewRows,
    #[error("Modelo desconhecido: {0}")]
    Model(String),
    #[error("SKU não informado")]
    MissingSku,
    #[error("Informe ao menos uma linha, processo ou classe ABC")]
    EmptyCombination,
    #[error("Linha desconhecida: {0}")]
    UnknownLine(u32),
    #[error("Processo desconhecido: {0}")]
    UnknownProcess(String),
    #[error("Classe ABC desconhecida: {0}")]
    UnknownClass(String),
}

fn known_model(name: &str) -> bool {
    ForecastModel::from_wire_name(name).is_ok() || name.parse::<ForecastModel>().is_ok()
}

fn filled<T>(values: &Option<Vec<T>>) -> &[T] {
    values.as_deref().unwrap_or_default()
}

pub fn validate_request(request: &PredictRequest) -> Result<(), RequestError> {
    if request.periods == 0 || request.periods > MAX_PERIODS {
        return Err(RequestError::Periods(request.periods));
    }
    if request.preview_rows == 0 {
        return Err(RequestError::PreviewRows);
    }
    if !known_model(&request.model) {
        return Err(RequestError::Model(request.model.clone()));
    }

    match &request.target {
        TargetSet::All => Ok(()),
        TargetSet::Sku { sku } if sku.trim().is_empty() => Err(RequestError::MissingSku),
        TargetSet::Sku { .. } => Ok(()),
        TargetSet::Combined {
            familia,
            processo,
            abc_class,
        } => {
            let (lines, processes, classes) = (filled(familia), filled(processo), filled(abc_class));
            if lines.is_empty() && processes.is_empty() && classes.is_empty() {
                return Err(RequestError::EmptyCombination);
            }
            if let Some(ordinal) = lines
                .iter()
                .find(|n| catalog::line(&format!("linha_{}", n)).is_none())
            {
                return Err(RequestError::UnknownLine(*ordinal));
            }
            if let Some(process) = processes.iter().find(|p| catalog::process(p).is_none()) {
                return Err(RequestError::UnknownProcess(process.clone()));
            }
            if let Some(class) = classes.iter().find(|c| c.parse::<AbcClass>().is_err()) {
                return Err(RequestError::UnknownClass(class.clone()));
            }
            Ok(())
        }
    }
}
