// Navigation destinations
// Route names shared by the screens; detail routes carry the request id

/// Screens reachable in the navigation graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Splash,
    Login,
    Register,
    Home,
    /// Request-creation form; also the target of a shake on the home feed
    PlasmaRequest,
    /// Detail view for one donation request
    Detail { request_id: String },
    DonationCentre,
    Profile,
}

const DETAIL_PREFIX: &str = "detail";

impl Destination {
    /// Route string as registered with the navigation graph
    pub fn route(&self) -> String {
        match self {
            Destination::Splash => "splash".to_string(),
            Destination::Login => "login".to_string(),
            Destination::Register => "register".to_string(),
            Destination::Home => "home".to_string(),
            Destination::PlasmaRequest => "plasma_request".to_string(),
            Destination::Detail { request_id } => format!("{}/{}", DETAIL_PREFIX, request_id),
            Destination::DonationCentre => "donation_centre".to_string(),
            Destination::Profile => "profile".to_string(),
        }
    }

    /// Parse a route string; `None` for unknown routes or a detail route
    /// without an id
    pub fn from_route(route: &str) -> Option<Self> {
        let destination = match route {
            "splash" => Destination::Splash,
            "login" => Destination::Login,
            "register" => Destination::Register,
            "home" => Destination::Home,
            "plasma_request" => Destination::PlasmaRequest,
            "donation_centre" => Destination::DonationCentre,
            "profile" => Destination::Profile,
            other => {
                let id = other.strip_prefix(DETAIL_PREFIX)?.strip_prefix('/')?;
                if id.is_empty() {
                    return None;
                }
                Destination::Detail {
                    request_id: id.to_string(),
                }
            }
        };
        Some(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_route_carries_id() {
        let detail = Destination::Detail {
            request_id: "abc123".to_string(),
        };
        assert_eq!(detail.route(), "detail/abc123");
        assert_eq!(Destination::from_route("detail/abc123"), Some(detail));
    }

    #[test]
    fn test_unknown_and_incomplete_routes() {
        assert_eq!(Destination::from_route("settings"), None);
        assert_eq!(Destination::from_route("detail/"), None);
        assert_eq!(Destination::from_route("detail"), None);
    }

    #[test]
    fn test_fixed_routes_parse_back() {
        for destination in [
            Destination::Splash,
            Destination::Login,
            Destination::Register,
            Destination::Home,
            Destination::PlasmaRequest,
            Destination::DonationCentre,
            Destination::Profile,
        ] {
            assert_eq!(
                Destination::from_route(&destination.route()),
                Some(destination)
            );
        }
    }
}
