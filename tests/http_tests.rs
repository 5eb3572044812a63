use reqwest::StatusCode;
use reqwest::blocking::Client;
use std::net::TcpListener;
use std::process::{Child, Command};
use std::thread;
use std::time::{Duration, Instant};

const STARTUP_TIMEOUT: Duration = Duration::from_secs(10);

struct WeatherTestServer {
    process: Child,
    base_url: String,
}

impl WeatherTestServer {
    /// Starts the backend without any provider credential.
    fn spawn(port: u16) -> Self {
        Self::try_spawn(port).expect("Backend did not come up")
    }

    /// Fails when the backend exits or doesn't answer before the deadline.
    fn try_spawn(port: u16) -> Result<Self, String> {
        let backend_executable = env!("CARGO_BIN_EXE_weather-backend");
        let mut server = WeatherTestServer {
            process: Command::new(backend_executable)
                .args(["--port", &port.to_string()])
                .env_remove("ACCUWEATHER_API_KEY")
                .env_remove("ACCUWEATHER_BASE_URL")
                .env_remove("WEATHER_CONFIG")
                .spawn()
                .expect("Could not start backend"),
            base_url: format!("http://127.0.0.1:{port}"),
        };
        let client = Client::builder()
            .timeout(Duration::from_millis(500))
            .build()
            .expect("Could not build client");
        let deadline = Instant::now() + STARTUP_TIMEOUT;
        loop {
            if let Some(status) = server.process.try_wait().expect("Could not poll backend") {
                return Err(format!("backend exited with {status}"));
            }
            if client.get(server.url("/api")).send().is_ok() {
                return Ok(server);
            }
            if Instant::now() > deadline {
                return Err(format!("backend not answering on port {port}"));
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for WeatherTestServer {
    fn drop(&mut self) {
        // Already gone when startup failed.
        if let Ok(None) = self.process.try_wait() {
            self.process
                .kill()
                .expect("Failed to send kill signal to backend");
        }
        self.process.wait().expect("Backend failed to stop");
    }
}

fn error_message(response: reqwest::blocking::Response) -> String {
    let body: serde_json::Value = response.json().expect("error body should be json");
    body["error"]
        .as_str()
        .expect("error body should have an error field")
        .to_string()
}

#[test]
fn can_start_and_stop_backend() {
    WeatherTestServer::spawn(3917);
}

#[test]
fn startup_fails_when_port_is_taken() {
    let _listener = TcpListener::bind("0.0.0.0:3920").expect("Could not bind test port");
    let error = WeatherTestServer::try_spawn(3920)
        .err()
        .expect("backend should not start on a taken port");
    assert!(error.contains("exited"), "{error}");
}

#[test]
fn weather_fails_closed_without_api_key() {
    let server = WeatherTestServer::spawn(3918);
    let client = Client::new();

    for path in [
        "/api?location=328328&type=current",
        "/api?location=328328&type=forecast",
        "/api?type=bogus",
    ] {
        let res = client
            .get(server.url(path))
            .send()
            .expect("Could not send request");
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR, "{path}");
        assert_eq!(error_message(res), "AccuWeather API key not configured");
    }
}

#[test]
fn search_fails_closed_without_api_key() {
    let server = WeatherTestServer::spawn(3919);
    let client = Client::new();

    for path in ["/api/search?q=Lon", "/api/search"] {
        let res = client
            .get(server.url(path))
            .send()
            .expect("Could not send request");
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR, "{path}");
        assert_eq!(error_message(res), "AccuWeather API key not configured");
    }
}
