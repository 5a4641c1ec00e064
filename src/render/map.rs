use std::io::Write;

use askama::Template;
use serde_json::{json, Value};

use super::error::RenderError;
use crate::track::{start_sample, Sample};

#[derive(Template)]
#[template(path = "map.html")]
pub struct MapTemplate {
    pub access_token: String,
    pub start: Sample,
    pub point_count: usize,
    pub first_time: String,
    pub last_time: String,
    /// GeoJSON feature collection: the track line plus one point per sample.
    pub track_json: String,
}

/// Renders a resampled track onto a Mapbox page.
///
/// The access token is forwarded to the page untouched.
#[derive(Debug, Clone)]
pub struct MapRenderer {
    access_token: String,
}

impl MapRenderer {
    pub fn new(access_token: Option<String>) -> Result<Self, RenderError> {
        match access_token {
            Some(token) if !token.trim().is_empty() => Ok(Self {
                access_token: token,
            }),
            _ => Err(RenderError::MissingAccessToken),
        }
    }

    pub fn template(&self, samples: &[Sample]) -> Result<MapTemplate, RenderError> {
        let start = start_sample(samples).ok_or(RenderError::EmptyTrack)?;
        let (first, last) = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(RenderError::EmptyTrack),
        };

        Ok(MapTemplate {
            access_token: self.access_token.clone(),
            start: start.clone(),
            point_count: samples.len(),
            first_time: first.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            last_time: last.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            track_json: serde_json::to_string(&feature_collection(samples))?,
        })
    }

    pub fn render_html(&self, samples: &[Sample]) -> Result<String, RenderError> {
        Ok(self.template(samples)?.render()?)
    }

    /// Render the page fully before writing, so a failure leaves `out` untouched.
    pub fn render<W: Write>(&self, samples: &[Sample], mut out: W) -> Result<(), RenderError> {
        let html = self.render_html(samples)?;
        out.write_all(html.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

fn feature_collection(samples: &[Sample]) -> Value {
    let line: Vec<[f64; 2]> = samples.iter().map(|s| [s.longitude, s.latitude]).collect();

    let mut features = Vec::with_capacity(samples.len() + 1);
    features.push(json!({
        "type": "Feature",
        "geometry": { "type": "LineString", "coordinates": line },
        "properties": {},
    }));
    features.extend(samples.iter().map(|s| {
        json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [s.longitude, s.latitude] },
            "properties": {
                "time": s.timestamp.to_rfc3339(),
                "elevation": s.elevation,
            },
        })
    }));

    json!({ "type": "FeatureCollection", "features": features })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Tz;

    fn track() -> Vec<Sample> {
        (0..3)
            .map(|i| Sample {
                timestamp: Tz::UTC.with_ymd_and_hms(2021, 3, 14, 10, i, 0).unwrap(),
                latitude: 32.0 + f64::from(i),
                longitude: 34.5,
                elevation: 100.0,
            })
            .collect()
    }

    #[test]
    fn missing_token_is_rejected() {
        assert!(matches!(
            MapRenderer::new(None),
            Err(RenderError::MissingAccessToken)
        ));
        assert!(matches!(
            MapRenderer::new(Some("  ".into())),
            Err(RenderError::MissingAccessToken)
        ));
    }

    #[test]
    fn empty_track_cannot_be_rendered() {
        let renderer = MapRenderer::new(Some("pk.test".into())).unwrap();
        let mut out = Vec::new();

        let err = renderer.render(&[], &mut out).unwrap_err();

        assert!(matches!(err, RenderError::EmptyTrack));
        assert!(out.is_empty());
    }

    #[test]
    fn page_is_centred_on_the_middle_sample() {
        let renderer = MapRenderer::new(Some("pk.test".into())).unwrap();
        let template = renderer.template(&track()).unwrap();

        assert_eq!(template.start.latitude, 33.0);
        assert_eq!(template.point_count, 3);
        assert_eq!(template.first_time, "2021-03-14 10:00");
        assert_eq!(template.last_time, "2021-03-14 10:02");
    }

    #[test]
    fn rendered_page_carries_token_and_track() {
        let renderer = MapRenderer::new(Some("pk.test".into())).unwrap();
        let mut out = Vec::new();

        renderer.render(&track(), &mut out).unwrap();

        let html = String::from_utf8(out).unwrap();
        assert!(html.contains(r#"mapboxgl.accessToken = "pk.test";"#));
        assert!(html.contains("center: [34.5, 33]"));
        assert!(html.contains(r#""type":"LineString""#));
        assert!(html.contains("2021-03-14T10:01:00+00:00"));
    }

    #[test]
    fn geojson_has_line_and_points() {
        let value = feature_collection(&track());
        let features = value["features"].as_array().unwrap();

        assert_eq!(features.len(), 4);
        assert_eq!(features[0]["geometry"]["coordinates"][2][1], 34.0);
        assert_eq!(features[1]["geometry"]["type"], "Point");
    }
}
