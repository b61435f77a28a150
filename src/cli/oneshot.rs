//! Single invocation driven by flags (`huenix -g kitchen -o on -b 200`).

use std::io;

use anyhow::{Context, Result};
use huenix::{Config, HttpGateway, OneShot, Session, StatePatch, parse_power};

use crate::cli::Cli;

/// Translate the flags into a [`OneShot`] request.
pub fn request(cli: &Cli) -> Result<OneShot> {
    let on = cli.onoff.as_deref().map(parse_power).transpose()?;
    Ok(OneShot {
        group: cli.group.clone(),
        patch: StatePatch::from_values(on, cli.brightness, cli.saturation, cli.color),
        print_status: cli.print,
    })
}

/// Run the request against the configured bridge.
pub fn handle(cli: &Cli, config: &Config) -> Result<()> {
    let request = request(cli)?;
    let gateway = HttpGateway::new(config)
        .with_context(|| format!("failed to set up bridge client from {}", config.path.display()))?;
    let mut session = Session::new(&gateway);
    let mut stdout = io::stdout().lock();
    session.run_once(&request, &mut stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use huenix::ValidationError;

    #[test]
    fn flags_are_clamped_into_a_patch() {
        let cli = Cli::try_parse_from(["huenix", "-g", "den", "-o", "ON", "-b", "300", "-c", "-1"])
            .unwrap();
        let req = request(&cli).unwrap();
        assert_eq!(req.group.as_deref(), Some("den"));
        assert_eq!(
            req.patch,
            StatePatch {
                on: Some(true),
                brightness: Some(254),
                saturation: None,
                hue: Some(0),
            }
        );
        assert!(!req.print_status);
    }

    #[test]
    fn bad_onoff_value_is_a_validation_error() {
        let cli = Cli::try_parse_from(["huenix", "-g", "den", "-o", "dim"]).unwrap();
        let err = request(&cli).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::InvalidPower("dim".to_string()))
        );
    }
}
