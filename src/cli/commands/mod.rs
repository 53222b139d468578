pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_PORT: &str = "port";
pub const ARG_DB_PATH: &str = "db-path";
pub const ARG_TOKEN_TTL: &str = "token-ttl-seconds";
pub const ARG_ENV: &str = "env";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("idento")
        .about("Credential authentication service")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("IDENTO_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_DB_PATH)
                .short('d')
                .long("db-path")
                .help("Path to the SQLite database file (created if missing)")
                .env("IDENTO_DB_PATH")
                .required(true),
        )
        .arg(
            Arg::new(ARG_TOKEN_TTL)
                .long("token-ttl-seconds")
                .help("Lifetime of issued session tokens in seconds")
                .default_value("3600")
                .env("IDENTO_TOKEN_TTL_SECONDS")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_ENV)
                .long("env")
                .help("Environment name, affects only log shape and level")
                .default_value("local")
                .env("IDENTO_ENV")
                .value_parser(["local", "dev", "prod"]),
        );

    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "idento");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Credential authentication service".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_defaults() {
        let matches = new().get_matches_from(vec!["idento", "--db-path", "/tmp/idento.db"]);

        assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(8080));
        assert_eq!(matches.get_one::<u64>(ARG_TOKEN_TTL).copied(), Some(3600));
        assert_eq!(
            matches.get_one::<String>(ARG_ENV).cloned(),
            Some("local".to_string())
        );
    }

    #[test]
    fn test_flags_override_defaults() {
        let matches = new().get_matches_from(vec![
            "idento",
            "--port",
            "9090",
            "--db-path",
            "/tmp/idento.db",
            "--token-ttl-seconds",
            "600",
            "--env",
            "prod",
        ]);

        assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(9090));
        assert_eq!(
            matches.get_one::<String>(ARG_DB_PATH).cloned(),
            Some("/tmp/idento.db".to_string())
        );
        assert_eq!(matches.get_one::<u64>(ARG_TOKEN_TTL).copied(), Some(600));
        assert_eq!(
            matches.get_one::<String>(ARG_ENV).cloned(),
            Some("prod".to_string())
        );
    }

    #[test]
    fn test_env_fallbacks() {
        temp_env::with_vars(
            [
                ("IDENTO_PORT", Some("8443")),
                ("IDENTO_DB_PATH", Some("/var/lib/idento/idento.db")),
                ("IDENTO_TOKEN_TTL_SECONDS", Some("7200")),
                ("IDENTO_ENV", Some("dev")),
            ],
            || {
                let matches = new().get_matches_from(vec!["idento"]);

                assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(8443));
                assert_eq!(
                    matches.get_one::<String>(ARG_DB_PATH).cloned(),
                    Some("/var/lib/idento/idento.db".to_string())
                );
                assert_eq!(matches.get_one::<u64>(ARG_TOKEN_TTL).copied(), Some(7200));
                assert_eq!(
                    matches.get_one::<String>(ARG_ENV).cloned(),
                    Some("dev".to_string())
                );
            },
        );
    }

    #[test]
    fn test_db_path_is_required() {
        temp_env::with_vars([("IDENTO_DB_PATH", None::<&str>)], || {
            let result = new().try_get_matches_from(vec!["idento"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_invalid_env_is_rejected() {
        let result = new().try_get_matches_from(vec![
            "idento",
            "--db-path",
            "/tmp/idento.db",
            "--env",
            "staging",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let result = new().try_get_matches_from(vec![
            "idento",
            "--db-path",
            "/tmp/idento.db",
            "--token-ttl-seconds",
            "0",
        ]);
        assert!(result.is_err());
    }
}
