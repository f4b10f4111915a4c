/*
 *  collector/ping.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Round trip latency with the system ping
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

use std::process::Stdio;
use std::time::Duration;

use log::{debug, warn};
use tokio::process::Command;
use tokio::time::timeout;

use crate::metrics::Latency;

/// Pull the rtt out of a ping reply line, e.g. `time=23.4 ms`
pub fn parse_rtt(output: &str) -> Option<f64> {
    let start = output.find("time=")? + "time=".len();
    let rest = &output[start..];
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

pub struct LatencyProbe {
    host: String,
    timeout: Duration,
}

impl LatencyProbe {
    pub fn new(host: impl Into<String>, timeout: Duration) -> Self {
        Self { host: host.into(), timeout }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// One echo request; anything but a timely reply is `Latency::Timeout`
    pub async fn measure(&self) -> Latency {
        // ping's own -W has whole second resolution
        let wait_secs = self.timeout.as_secs_f64().ceil().max(1.0) as u64;
        let mut cmd = Command::new("ping");
        cmd.args(["-n", "-c", "1", "-W", &wait_secs.to_string(), &self.host])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        match timeout(self.timeout, cmd.output()).await {
            Ok(Ok(out)) if out.status.success() => {
                match parse_rtt(&String::from_utf8_lossy(&out.stdout)) {
                    Some(ms) => {
                        debug!("ping {} {:.1} ms", self.host, ms);
                        Latency::Millis(ms)
                    }
                    None => Latency::Timeout,
                }
            }
            Ok(Ok(_)) => Latency::Timeout,
            Ok(Err(e)) => {
                warn!("cannot run ping: {}", e);
                Latency::Timeout
            }
            Err(_) => Latency::Timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rtt() {
        let out = "PING 8.8.8.8 (8.8.8.8) 56(84) bytes of data.\n\
                   64 bytes from 8.8.8.8: icmp_seq=1 ttl=117 time=23.4 ms\n";
        assert_eq!(parse_rtt(out), Some(23.4));
        assert_eq!(parse_rtt("64 bytes from ::1: icmp_seq=1 time=0.045 ms"), Some(0.045));
        assert_eq!(parse_rtt("64 bytes from h: time=12 ms"), Some(12.0));
    }

    #[test]
    fn test_parse_rtt_without_reply() {
        assert_eq!(parse_rtt("1 packets transmitted, 0 received, 100% packet loss"), None);
        assert_eq!(parse_rtt("time=ms"), None);
    }
}
