use anyhow::{Context, Result};
use serde::Serialize;

use crate::dashboard::{ChartData, ChartMetadata};

/// Chart-input payload consumed by external renderers: the plot points,
/// the y-axis ceiling and the headline counts.
#[derive(Debug, Serialize)]
pub struct ChartPayload<'a> {
    #[serde(flatten)]
    pub chart: &'a ChartData,
    pub metadata: &'a ChartMetadata,
}

/// Serialize the chart payload as pretty-printed JSON
pub fn to_json(chart: &ChartData, metadata: &ChartMetadata) -> Result<String> {
    serde_json::to_string_pretty(&ChartPayload { chart, metadata })
        .context("Failed to serialize chart payload")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::ChartPoint;

    #[test]
    fn test_payload_shape() {
        let chart = ChartData {
            points: vec![ChartPoint {
                x: 2,
                y: 10,
                contributor: "alice".to_string(),
                image: "https://github.com/alice.png?size=40".to_string(),
            }],
            max_y: 10,
        };
        let metadata = ChartMetadata {
            all_prs: 1,
            open_prs: 1,
            closed_prs: 0,
        };

        let json = to_json(&chart, &metadata).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["max_y"], 10);
        assert_eq!(value["points"][0]["contributor"], "alice");
        assert_eq!(value["metadata"]["all_prs"], 1);
    }

    #[test]
    fn test_empty_payload() {
        let json = to_json(&ChartData::default(), &ChartMetadata::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["points"].as_array().unwrap().len(), 0);
        assert_eq!(value["max_y"], 0);
        assert_eq!(value["metadata"]["all_prs"], 0);
    }
}
