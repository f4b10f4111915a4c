/*
 *  collector/docker.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Container run state via the Docker engine API
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::time::Duration;

use bollard::Docker;
use bollard::errors::Error as DockerError;
use bollard::query_parameters::InspectContainerOptions;
use futures_util::future::join_all;
use log::{debug, warn};
use tokio::time::timeout;

use crate::metrics::{CONTAINER_NOT_FOUND, CONTAINER_UNAVAILABLE, ContainerStatus};

/// Looks up the watched containers all at once, each under its own timeout,
/// so the whole block costs at most one timeout.
///
/// Lookups never fail: an unknown container reads as "Not Found", an engine
/// that cannot be reached or answers too late reads as "unavailable".
pub struct ContainerProbe {
    docker: Option<Docker>,
    names: Vec<String>,
    timeout: Duration,
}

impl ContainerProbe {
    pub fn new(names: Vec<String>, timeout: Duration) -> Self {
        let docker = match Docker::connect_with_unix_defaults() {
            Ok(d) => Some(d),
            Err(e) => {
                warn!("docker engine unreachable, containers will show {}: {}", CONTAINER_UNAVAILABLE, e);
                None
            }
        };
        Self { docker, names, timeout }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// One status per watched name, in configured order
    pub async fn statuses(&self) -> Vec<ContainerStatus> {
        let lookups = self.names.iter().map(|name| async move {
            let status = self.status(name).await;
            debug!("container {} {}", name, status);
            ContainerStatus::new(name.clone(), status)
        });
        join_all(lookups).await
    }

    async fn status(&self, name: &str) -> String {
        let Some(docker) = self.docker.as_ref() else {
            return CONTAINER_UNAVAILABLE.to_string();
        };
        let query = docker.inspect_container(name, None::<InspectContainerOptions>);
        match timeout(self.timeout, query).await {
            Ok(Ok(resp)) => resp
                .state
                .and_then(|s| s.status)
                .map(|s| s.to_string())
                .unwrap_or_else(|| CONTAINER_UNAVAILABLE.to_string()),
            Ok(Err(e)) => classify_error(name, &e).to_string(),
            Err(_) => {
                warn!("docker inspect {} exceeded {:?}", name, self.timeout);
                CONTAINER_UNAVAILABLE.to_string()
            }
        }
    }
}

fn classify_error(name: &str, err: &DockerError) -> &'static str {
    match err {
        DockerError::DockerResponseServerError { status_code: 404, .. } => CONTAINER_NOT_FOUND,
        other => {
            warn!("docker inspect {} failed: {}", name, other);
            CONTAINER_UNAVAILABLE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_container_reads_not_found() {
        let err = DockerError::DockerResponseServerError {
            status_code: 404,
            message: "No such container: ghost".into(),
        };
        assert_eq!(classify_error("ghost", &err), "Not Found");
    }

    #[test]
    fn test_engine_error_reads_unavailable() {
        let err = DockerError::DockerResponseServerError {
            status_code: 500,
            message: "boom".into(),
        };
        assert_eq!(classify_error("ha", &err), "unavailable");
    }

    #[tokio::test]
    async fn test_no_engine_reads_unavailable() {
        let probe = ContainerProbe {
            docker: None,
            names: vec!["homeassistant".into()],
            timeout: Duration::from_millis(10),
        };
        assert_eq!(
            probe.statuses().await,
            vec![ContainerStatus::new("homeassistant", "unavailable")]
        );
    }

    #[tokio::test]
    async fn test_hung_engine_costs_one_timeout() {
        // accepts connections but never answers
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("docker.sock");
        let _engine = std::os::unix::net::UnixListener::bind(&socket).unwrap();
        let docker = Docker::connect_with_unix(
            socket.to_str().unwrap(),
            120,
            bollard::API_DEFAULT_VERSION,
        )
        .unwrap();

        let names: Vec<String> = (0..6).map(|i| format!("c{i}")).collect();
        let probe = ContainerProbe {
            docker: Some(docker),
            names: names.clone(),
            timeout: Duration::from_millis(200),
        };

        let started = std::time::Instant::now();
        let statuses = probe.statuses().await;
        // one after another would take 1.2s
        assert!(started.elapsed() < Duration::from_millis(800), "took {:?}", started.elapsed());
        let expected: Vec<ContainerStatus> = names
            .iter()
            .map(|n| ContainerStatus::new(n.as_str(), "unavailable"))
            .collect();
        assert_eq!(statuses, expected);
    }
}
