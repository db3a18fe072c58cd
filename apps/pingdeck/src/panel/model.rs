use pingdeck_client::CallEvent;
use pingdeck_endpoint::build;
use pingdeck_model::{ProbeRequest, Protocol, StatusEndpoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Host,
    Port,
}

/// Form state behind the panel. Edits mutate this directly; the endpoint is
/// rebuilt from it on demand, never cached.
#[derive(Debug, Clone)]
pub struct PanelState {
    pub host: String,
    pub port: String,
    pub protocol: Protocol,
    pub focus: Field,
    pub status_path: StatusEndpoint,
    pub result: Option<String>,
    pub last_event: Option<String>,
    pub in_flight: u32,
    next_seq: u64,
}

impl PanelState {
    pub fn new(status_path: StatusEndpoint) -> Self {
        Self {
            host: String::new(),
            port: String::new(),
            protocol: Protocol::Icmp,
            focus: Field::Host,
            status_path,
            result: None,
            last_event: None,
            in_flight: 0,
            next_seq: 0,
        }
    }

    pub fn request(&self) -> ProbeRequest {
        ProbeRequest::new(self.host.clone(), self.protocol, self.port.clone())
    }

    pub fn endpoint(&self) -> Option<String> {
        build(&self.request())
    }

    pub fn can_trigger(&self) -> bool {
        self.endpoint().is_some()
    }

    pub fn port_editable(&self) -> bool {
        self.protocol.requires_port()
    }

    /// Switching away from tcp keeps the port text but takes the focus off
    /// the now read-only field.
    pub fn select_protocol(&mut self, protocol: Protocol) {
        self.protocol = protocol;
        if !self.port_editable() && self.focus == Field::Port {
            self.focus = Field::Host;
        }
    }

    pub fn next_protocol(&mut self) {
        self.step_protocol(1);
    }

    pub fn prev_protocol(&mut self) {
        self.step_protocol(Protocol::ALL.len() - 1);
    }

    fn step_protocol(&mut self, step: usize) {
        let current = Protocol::ALL
            .iter()
            .position(|protocol| *protocol == self.protocol)
            .unwrap_or(0);
        let next = Protocol::ALL[(current + step) % Protocol::ALL.len()];
        self.select_protocol(next);
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::Host if self.port_editable() => Field::Port,
            _ => Field::Host,
        };
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        match self.focus {
            Field::Host => self.host.push(ch),
            Field::Port if self.port_editable() => self.port.push(ch),
            Field::Port => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            Field::Host => {
                self.host.pop();
            }
            Field::Port if self.port_editable() => {
                self.port.pop();
            }
            Field::Port => {}
        }
    }

    /// Registers a dispatched call and hands out its sequence number.
    pub fn begin_call(&mut self, endpoint: &str) -> u64 {
        self.next_seq += 1;
        self.in_flight += 1;
        self.last_event = Some(format!("GET {endpoint}"));
        self.next_seq
    }

    /// Whatever finishes last overwrites the displayed result, regardless of
    /// dispatch order.
    pub fn apply(&mut self, event: &CallEvent, stamp: &str) {
        let CallEvent::Finished { seq, display } = event;
        self.in_flight = self.in_flight.saturating_sub(1);
        self.result = Some(display.clone());
        self.last_event = Some(format!("call #{seq} finished at {stamp}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> PanelState {
        PanelState::new(StatusEndpoint::Status)
    }

    #[test]
    fn trigger_enablement_tracks_the_builder() {
        let mut state = state();
        assert!(!state.can_trigger());

        state.host = "8.8.8.8".to_string();
        assert!(state.can_trigger());
        assert_eq!(state.endpoint().as_deref(), Some("ping/icmp?host=8.8.8.8"));

        state.select_protocol(Protocol::Tcp);
        assert!(!state.can_trigger());

        state.port = "80".to_string();
        assert!(state.can_trigger());
        assert_eq!(
            state.endpoint().as_deref(),
            Some("ping/tcp?host=8.8.8.8&port=80")
        );
    }

    #[test]
    fn port_text_survives_protocol_switches() {
        let mut state = state();
        state.select_protocol(Protocol::Tcp);
        state.focus = Field::Port;
        for ch in "8080".chars() {
            state.insert_char(ch);
        }

        state.select_protocol(Protocol::Udp);
        assert_eq!(state.port, "8080");

        state.select_protocol(Protocol::Tcp);
        assert_eq!(state.port, "8080");
    }

    #[test]
    fn focus_leaves_the_port_field_when_it_goes_read_only() {
        let mut state = state();
        state.select_protocol(Protocol::Tcp);
        state.toggle_focus();
        assert_eq!(state.focus, Field::Port);

        state.select_protocol(Protocol::Arp);
        assert_eq!(state.focus, Field::Host);
    }

    #[test]
    fn port_field_ignores_edits_unless_tcp() {
        let mut state = state();
        state.focus = Field::Port;
        state.insert_char('8');
        assert_eq!(state.port, "");

        state.select_protocol(Protocol::Tcp);
        state.focus = Field::Port;
        state.insert_char('8');
        assert_eq!(state.port, "8");
    }

    #[test]
    fn toggle_focus_skips_port_for_portless_protocols() {
        let mut state = state();
        state.toggle_focus();
        assert_eq!(state.focus, Field::Host);

        state.select_protocol(Protocol::Tcp);
        state.toggle_focus();
        assert_eq!(state.focus, Field::Port);
        state.toggle_focus();
        assert_eq!(state.focus, Field::Host);
    }

    #[test]
    fn later_completion_overwrites_earlier_results() {
        let mut state = state();
        state.host = "8.8.8.8".to_string();
        let first = state.begin_call("ping/icmp?host=8.8.8.8");
        let second = state.begin_call("ping/icmp?host=8.8.8.8");
        assert_eq!(state.in_flight, 2);

        // the second dispatch finishes first; the first finishes later and wins
        state.apply(
            &CallEvent::Finished {
                seq: second,
                display: "{\n  \"seq\": 2\n}".to_string(),
            },
            "10:00:01",
        );
        state.apply(
            &CallEvent::Finished {
                seq: first,
                display: "{\n  \"seq\": 1\n}".to_string(),
            },
            "10:00:02",
        );

        assert_eq!(state.in_flight, 0);
        assert!(state.result.as_deref().unwrap().contains("\"seq\": 1"));
    }
}
