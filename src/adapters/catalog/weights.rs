//! Trained weights artifact loader (JSON).

use std::path::Path;

use super::CatalogError;
use crate::domain::estimator::{NetworkWeights, TraitEstimator, TraitNetwork};

pub fn load_estimator(path: &Path) -> Result<TraitEstimator, CatalogError> {
    let source = path.display().to_string();
    let json = std::fs::read_to_string(path).map_err(|e| CatalogError::io(&source, e))?;
    parse_estimator(&json, &source)
}

pub fn parse_estimator(json: &str, source: &str) -> Result<TraitEstimator, CatalogError> {
    let weights: NetworkWeights = serde_json::from_str(json).map_err(|e| CatalogError::parse(source, e))?;
    let network = TraitNetwork::from_weights(weights).map_err(|e| CatalogError::invalid(source, e))?;
    tracing::info!(source, hidden = network.hidden_size(), "trait network weights loaded");
    Ok(TraitEstimator::new(network))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn artifact(hidden: usize, l3_rows: usize) -> String {
        json!({
            "l1_weight": vec![vec![0.1; 4]; hidden],
            "l1_bias": vec![0.0; hidden],
            "l2_weight": vec![vec![0.1; hidden]; hidden],
            "l2_bias": vec![0.0; hidden],
            "l3_weight": vec![vec![0.1; hidden]; l3_rows],
            "l3_bias": vec![0.0; l3_rows],
        })
        .to_string()
    }

    #[test]
    fn loads_a_well_formed_artifact() {
        let estimator = parse_estimator(&artifact(8, 4), "weights.json").unwrap();
        assert_eq!(estimator.network().hidden_size(), 8);
    }

    #[test]
    fn wrong_output_width_is_rejected() {
        assert!(matches!(
            parse_estimator(&artifact(8, 3), "weights.json"),
            Err(CatalogError::Invalid { .. })
        ));
    }

    #[test]
    fn missing_key_is_a_parse_error() {
        assert!(matches!(
            parse_estimator(r#"{"l1_weight": []}"#, "weights.json"),
            Err(CatalogError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_fatal() {
        assert!(load_estimator(Path::new("/no/such/weights.json")).is_err());
    }
}
