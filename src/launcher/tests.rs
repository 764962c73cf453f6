//! Launcher Module Tests
//!
//! ## Test Scopes
//! - **Specs**: Default service definitions and builder helpers.
//! - **Supervisor**: Spawning real child processes, skipping failures, and shutdown.

#[cfg(test)]
mod tests {
    use crate::launcher::process::{
        ProcessSpec, SHUTDOWN_TIMEOUT, Supervisor, default_specs, prefix_line,
    };
    use std::time::{Duration, Instant};

    // ============================================================
    // PROCESS SPECS
    // ============================================================

    #[test]
    fn test_default_specs_wire_addresses() {
        let specs = default_specs(":8090", ":8080", "http://localhost:8090");

        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].name, "searchd");
        assert!(
            specs[0]
                .env
                .contains(&("SEARCHD_ADDR".to_string(), ":8090".to_string()))
        );

        assert_eq!(specs[1].name, "gateway");
        assert!(
            specs[1]
                .env
                .contains(&("SEARCHD_URL".to_string(), "http://localhost:8090".to_string()))
        );
        assert!(
            specs[1]
                .env
                .contains(&("GATEWAY_ADDR".to_string(), ":8080".to_string()))
        );
    }

    #[test]
    fn test_process_spec_builder() {
        let spec = ProcessSpec::new("echo", "echo", &["a", "b"]).with_env("K", "V");

        assert_eq!(spec.program, "echo");
        assert_eq!(spec.args, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(spec.env, vec![("K".to_string(), "V".to_string())]);
    }

    #[test]
    fn test_prefix_line() {
        assert_eq!(prefix_line("searchd", "listening"), "[searchd] listening");
    }

    // ============================================================
    // SUPERVISOR
    // ============================================================

    #[tokio::test]
    async fn test_supervisor_skips_unknown_program() {
        let supervisor = Supervisor::start(vec![ProcessSpec::new(
            "ghost",
            "definitely-not-a-real-binary-for-tests",
            &[],
        )]);

        assert!(supervisor.is_empty());
        supervisor.shutdown().await;
    }

    #[tokio::test]
    async fn test_supervisor_starts_and_stops_children() {
        let supervisor = Supervisor::start(vec![
            ProcessSpec::new("sleeper", "sleep", &["30"]),
            ProcessSpec::new("ghost", "definitely-not-a-real-binary-for-tests", &[]),
        ]);

        assert_eq!(supervisor.len(), 1);
        assert_eq!(supervisor.names(), vec!["sleeper".to_string()]);

        let started = Instant::now();
        supervisor.shutdown().await;

        // `sleep` stops on SIGTERM, so no escalation is needed
        assert!(started.elapsed() < SHUTDOWN_TIMEOUT);
    }

    #[tokio::test]
    async fn test_supervisor_kills_child_ignoring_sigterm() {
        let supervisor = Supervisor::start(vec![ProcessSpec::new(
            "stubborn",
            "sh",
            &["-c", "trap '' TERM; sleep 30 & wait"],
        )]);
        assert_eq!(supervisor.len(), 1);
        // Let the shell install its trap before the signal arrives
        tokio::time::sleep(Duration::from_millis(300)).await;

        let started = Instant::now();
        supervisor.shutdown().await;

        let elapsed = started.elapsed();
        assert!(elapsed >= SHUTDOWN_TIMEOUT);
        assert!(elapsed < SHUTDOWN_TIMEOUT + Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_supervisor_handles_already_exited_child() {
        let supervisor = Supervisor::start(vec![ProcessSpec::new("true", "true", &[])]);
        assert_eq!(supervisor.len(), 1);

        tokio::time::sleep(Duration::from_millis(100)).await;
        supervisor.shutdown().await;
    }
}
