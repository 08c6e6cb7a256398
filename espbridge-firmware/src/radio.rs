use espbridge_proto::NetworkRecord;

/// Hardware seam between the command dispatcher and the WiFi/TCP stack.
///
/// The radio owns all connection state, including the single TCP session;
/// the dispatcher only asks questions and issues transitions. Implementors
/// must drop the session when WiFi goes away and when the peer closes it.
pub trait WifiRadio {
    type Error;

    /// Starts joining a network. Like the hardware it models, this only
    /// initiates the attempt; completion is observed via [`is_connected`].
    ///
    /// [`is_connected`]: WifiRadio::is_connected
    fn connect(&mut self, ssid: &str, password: &str) -> Result<(), Self::Error>;

    fn disconnect(&mut self);

    fn is_connected(&self) -> bool;

    fn ssid(&self) -> Option<String>;

    fn ip(&self) -> Option<String>;

    /// Signal strength of the joined network in dBm.
    fn rssi(&self) -> Option<i32>;

    fn scan(&mut self) -> Vec<NetworkRecord>;

    /// Opens the single TCP session, replacing any session already open.
    fn tcp_open(&mut self, host: &str, port: u16) -> Result<(), Self::Error>;

    fn tcp_is_open(&self) -> bool;

    fn tcp_send(&mut self, data: &str) -> Result<(), Self::Error>;

    fn tcp_close(&mut self);

    /// Drains pending inbound TCP payload; `None` while the session is
    /// quiet or closed.
    fn tcp_recv(&mut self) -> Option<String>;
}
