use icolat_engine::geo::LatticeError;
use icolat_engine::{ConfigError, EngineConfig};

#[test]
fn default_config_builds_a_lattice() -> Result<(), ConfigError> {
    let cfg = EngineConfig::default();
    let lattice = cfg.lattice()?;
    assert_eq!(lattice.len(), 252);
    Ok(())
}

#[test]
fn oversized_lattice_is_rejected() {
    let cfg = EngineConfig { subdivisions: 10_000, ..EngineConfig::default() };
    let err = cfg.geometry().map(|_| ()).unwrap_err();
    assert_eq!(err, ConfigError::Lattice(LatticeError::InvalidSubdivisions { got: 10_000, max: 8192 }));
    assert_eq!(err.to_string(), "subdivisions must be in 1..=8192 (got 10000)");
}

#[cfg(feature = "serde")]
#[test]
fn config_round_trips_through_json() -> Result<(), serde_json::Error> {
    let cfg = EngineConfig { subdivisions: 12, stiffness: 0.5 };
    let json = serde_json::to_string(&cfg)?;
    let back: EngineConfig = serde_json::from_str(&json)?;
    assert_eq!(back, cfg);
    let partial: EngineConfig = serde_json::from_str(r#"{"subdivisions": 7}"#)?;
    assert_eq!(partial, EngineConfig { subdivisions: 7, ..EngineConfig::default() });
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn coordinates_serialize_with_named_fields() -> Result<(), serde_json::Error> {
    use icolat_engine::geo::PolarCoordinate;
    let c = PolarCoordinate::new(1, 2, 3, 4);
    let json = serde_json::to_value(c)?;
    assert_eq!(json["lat"]["face"], 1);
    assert_eq!(json["lon"]["div"], 4);
    Ok(())
}
