//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use skymesh_lib::{Drone, Position, RouteRequest as LibRouteRequest, SearchMode};

use crate::ProblemDetails;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input. The `request_id` populates the `instance` field
/// of any returned problem. Boxed to keep the `Err` variant small.
pub trait Validate {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// A drone entry in the wire request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroneSpec {
    /// Caller-chosen identifier, unique within the roster.
    pub id: String,
    /// Current position of the drone.
    pub pos: Position,
}

/// Request for computing a relay route across the mesh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    /// The drone roster.
    pub drones: Vec<DroneSpec>,

    /// Ground-station position; defaults to the origin.
    #[serde(default)]
    pub control_pos: Position,

    /// Maximum usable distance for links touching the control node.
    pub control_range: f64,

    /// Maximum usable distance for drone-to-drone links.
    pub drone_range: f64,

    /// Source node id.
    pub src: String,

    /// Destination node id.
    pub dst: String,

    /// Minimise summed link distance instead of hop count.
    #[serde(default)]
    pub weighted: bool,
}

impl RouteRequest {
    /// Convert into the library request.
    pub fn to_lib_request(&self) -> LibRouteRequest {
        LibRouteRequest {
            drones: self
                .drones
                .iter()
                .map(|d| Drone {
                    id: d.id.clone(),
                    pos: d.pos,
                })
                .collect(),
            control_pos: self.control_pos,
            control_range: self.control_range,
            drone_range: self.drone_range,
            src: self.src.clone(),
            dst: self.dst.clone(),
            mode: if self.weighted {
                SearchMode::DistanceMinimal
            } else {
                SearchMode::HopMinimal
            },
        }
    }
}

impl Validate for RouteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.src.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'src' field is required and cannot be empty",
                request_id,
            )));
        }

        if self.dst.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'dst' field is required and cannot be empty",
                request_id,
            )));
        }

        if !self.control_range.is_finite() || self.control_range < 0.0 {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'control_range' field must be a finite non-negative number",
                request_id,
            )));
        }

        if !self.drone_range.is_finite() || self.drone_range < 0.0 {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'drone_range' field must be a finite non-negative number",
                request_id,
            )));
        }

        if !self.control_pos.is_finite() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'control_pos' coordinates must be finite numbers",
                request_id,
            )));
        }

        for drone in &self.drones {
            if drone.id.trim().is_empty() {
                return Err(Box::new(ProblemDetails::bad_request(
                    "Drone ids cannot be empty",
                    request_id,
                )));
            }
            if !drone.pos.is_finite() {
                return Err(Box::new(ProblemDetails::bad_request(
                    format!("Position of drone '{}' must be finite", drone.id),
                    request_id,
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RouteRequest {
        RouteRequest {
            drones: vec![DroneSpec {
                id: "d1".to_string(),
                pos: Position::new(10.0, 0.0, 0.0),
            }],
            control_pos: Position::default(),
            control_range: 100.0,
            drone_range: 80.0,
            src: "__CONTROL__".to_string(),
            dst: "d1".to_string(),
            weighted: false,
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(valid_request().validate("test").is_ok());
    }

    #[test]
    fn empty_src_is_rejected() {
        let mut req = valid_request();
        req.src = "  ".to_string();
        let err = req.validate("test").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("'src'"));
    }

    #[test]
    fn empty_dst_is_rejected() {
        let mut req = valid_request();
        req.dst = String::new();
        let err = req.validate("test").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("'dst'"));
    }

    #[test]
    fn negative_range_is_rejected() {
        let mut req = valid_request();
        req.control_range = -1.0;
        let err = req.validate("test").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("'control_range'"));
    }

    #[test]
    fn nan_range_is_rejected() {
        let mut req = valid_request();
        req.drone_range = f64::NAN;
        let err = req.validate("test").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("'drone_range'"));
    }

    #[test]
    fn non_finite_drone_position_is_rejected() {
        let mut req = valid_request();
        req.drones[0].pos = Position::new(f64::INFINITY, 0.0, 0.0);
        let err = req.validate("test").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("d1"));
    }

    #[test]
    fn empty_drone_id_is_rejected() {
        let mut req = valid_request();
        req.drones[0].id = String::new();
        let err = req.validate("test").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("Drone ids"));
    }

    #[test]
    fn deserialization_defaults() {
        let json = r#"{
            "drones": [{"id": "d1", "pos": {"x": 1.0, "y": 2.0, "z": 3.0}}],
            "control_range": 100.0,
            "drone_range": 80.0,
            "src": "__CONTROL__",
            "dst": "d1"
        }"#;
        let req: RouteRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.control_pos, Position::default());
        assert!(!req.weighted);
    }

    #[test]
    fn weighted_flag_selects_distance_minimal_mode() {
        let mut req = valid_request();
        assert_eq!(req.to_lib_request().mode, SearchMode::HopMinimal);
        req.weighted = true;
        assert_eq!(req.to_lib_request().mode, SearchMode::DistanceMinimal);
    }
}
