//! Browser launch configuration and retrying launcher
//!
//! Builds the flag set the instrumented browser needs for deterministic,
//! automatable crawls, then starts the process through the CDP client,
//! retrying transient launch failures with exponential backoff.

use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::{self, JoinHandle};
use tracing::{debug, info, warn};

use crate::config::{CrawlArgs, DebugLevel};
use crate::error::{CrawlError, CrawlResult};
use crate::utils::{DEFAULT_LAUNCH_RETRIES, PAGEGRAPH_OUT_DIR_ENV, is_exec_file};

/// Product features turned off for crawls so they cannot perturb the page
/// under measurement. Owned by the product layer; passed through verbatim
/// into `--disable-features`.
const DISABLED_BRAVE_FEATURES: &[&str] = &[
    "BraveSync",
    "Speedreader",
    "Playlist",
    "BraveVPN",
    "AIRewriter",
    "AIChat",
    "BravePlayer",
    "BraveDebounce",
    "BraveRewards",
    "BraveSearchOmniboxBanner",
    "BraveGoogleSignInPermission",
    "BraveNTPBrandedWallpaper",
    "AdEvent",
    "NewTabPageAds",
    "CustomNotificationAds",
    "InlineContentAds",
    "PromotedContentAds",
    "TextClassification",
    "SiteVisit",
];

// =============================================================================
// LaunchConfig - fully-resolved launch configuration
// =============================================================================

/// Fully-resolved launch configuration for one crawl.
///
/// Immutable once built; a retry sequence reuses the same instance for
/// every attempt.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub(crate) executable: PathBuf,
    pub(crate) profile_path: PathBuf,
    pub(crate) args: Vec<String>,
    pub(crate) env: Vec<(String, String)>,
    pub(crate) dump_io: bool,
}

impl LaunchConfig {
    /// Assemble the launch configuration for `args`, binding the browser
    /// to the profile at `profile_path`. Pure; no filesystem access.
    ///
    /// The output directory rides in the child's environment block
    /// (`PAGEGRAPH_OUT_DIR`), not in the parent process environment, so
    /// concurrent crawls never race on it.
    #[must_use]
    pub fn for_args(args: &CrawlArgs, profile_path: &Path) -> Self {
        let mut flags = vec![
            "--disable-brave-update".to_string(),
            format!("--user-data-dir={}", profile_path.display()),
            "--disable-site-isolation-trials".to_string(),
            "--disable-component-update".to_string(),
            "--deny-permission-prompts".to_string(),
            "--no-first-run".to_string(),
            "--disable-background-timer-throttling".to_string(),
            "--disable-component-extensions-with-background-pages".to_string(),
            "--disable-ipc-flooding-protection".to_string(),
            "--disable-notifications".to_string(),
            "--mute-audio".to_string(),
            "--enable-features=PageGraph".to_string(),
            format!("--disable-features={}", DISABLED_BRAVE_FEATURES.join(",")),
        ];

        let dump_io = args.debug_level() == DebugLevel::Verbose;
        if dump_io {
            flags.push("--enable-logging=stderr".to_string());
            flags.push("--vmodule=page_graph*=2".to_string());
        }

        if let Some(extensions) = args.extensions_path() {
            flags.push(format!(
                "--disable-extensions-except={}",
                extensions.display()
            ));
            flags.push(format!("--load-extension={}", extensions.display()));
        }

        if let Some(proxy) = args.proxy_server() {
            flags.push(format!("--proxy-server={proxy}"));
            if proxy.is_socks5() {
                // Every non-proxy DNS lookup must fail, so nothing can
                // leak around the tunnel.
                flags.push(format!(
                    "--host-resolver-rules=MAP * ~NOTFOUND , EXCLUDE {}",
                    proxy.host()
                ));
            }
        }

        // Caller-supplied flags go last so they can override anything above.
        flags.extend(args.extra_args().iter().cloned());

        let env = vec![(
            PAGEGRAPH_OUT_DIR_ENV.to_string(),
            args.output_path().display().to_string(),
        )];

        Self {
            executable: args.executable_path().to_path_buf(),
            profile_path: profile_path.to_path_buf(),
            args: flags,
            env,
            dump_io,
        }
    }

    #[must_use]
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    #[must_use]
    pub fn profile_path(&self) -> &Path {
        &self.profile_path
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn env(&self) -> &[(String, String)] {
        &self.env
    }

    #[must_use]
    pub fn dump_io(&self) -> bool {
        self.dump_io
    }

    /// Map onto the CDP client's browser configuration: headful, no fixed
    /// viewport, the assembled flags, and the per-child environment block.
    fn browser_config(&self) -> CrawlResult<BrowserConfig> {
        BrowserConfig::builder()
            .chrome_executable(self.executable.clone())
            .user_data_dir(self.profile_path.clone())
            .args(self.args.clone())
            .envs(self.env.iter().cloned())
            .with_head()
            .viewport(None)
            .build()
            .map_err(CrawlError::Config)
    }
}

// =============================================================================
// RetryPolicy - bounded attempts, pluggable backoff
// =============================================================================

/// Retry policy for browser launches: a bounded attempt budget plus a
/// pluggable backoff curve mapping the attempt index to a delay.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the initial attempt. Zero means exactly one attempt.
    pub max_retries: u32,
    /// Pure function of the attempt index (1-based).
    pub backoff: fn(u32) -> Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_LAUNCH_RETRIES,
            backoff: default_backoff,
        }
    }
}

/// Base-2 exponential backoff: 1s, 2s, 4s, … for attempts 1, 2, 3, …
/// The shift is capped so the delay stays representable.
#[must_use]
pub fn default_backoff(attempt: u32) -> Duration {
    let multiplier = 1u64 << attempt.saturating_sub(1).min(20);
    Duration::from_millis(1000 * multiplier)
}

/// Run `op` once, then retry up to `policy.max_retries` times with the
/// policy's backoff delay before each retry.
///
/// Every failed attempt is logged with the remaining budget before the
/// sleep; nothing is swallowed silently. Exhaustion is terminal and names
/// the spent budget. The sleeps are non-blocking timed suspensions, so
/// concurrent crawls in the same process interleave freely.
pub async fn run_with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> CrawlResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = CrawlResult<T>>,
{
    match op().await {
        Ok(value) => return Ok(value),
        Err(err) => {
            debug!(
                "Failed to launch browser ({err}): {} left...",
                policy.max_retries
            );
        }
    }

    for attempt in 1..=policy.max_retries {
        tokio::time::sleep((policy.backoff)(attempt)).await;
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                debug!(
                    "Failed to launch browser ({err}): {} left...",
                    policy.max_retries - attempt
                );
            }
        }
    }

    Err(CrawlError::RetriesExhausted(policy.max_retries))
}

// =============================================================================
// Launch
// =============================================================================

/// A live browser process together with the CDP handler loop driving its
/// websocket.
pub struct BrowserHandle {
    pub browser: Browser,
    pub handler_task: JoinHandle<()>,
}

impl BrowserHandle {
    /// Close the browser and wait for the process and the handler loop to
    /// finish. Shutdown problems are logged, not propagated.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {e}");
        }
        if let Err(e) = self.handler_task.await {
            warn!("CDP handler task ended abnormally: {e}");
        }
    }
}

/// Launch the browser described by `config`, retrying transient failures
/// per `policy` (default: 3 retries, base-2 exponential backoff).
///
/// Returns the first successful handle at any attempt. A missing or
/// non-executable browser binary is a fatal configuration error, not a
/// retried one.
pub async fn launch_with_retry(
    config: &LaunchConfig,
    policy: &RetryPolicy,
) -> CrawlResult<BrowserHandle> {
    if !is_exec_file(config.executable()) {
        return Err(CrawlError::Config(format!(
            "browser executable not found or not executable: {}",
            config.executable().display()
        )));
    }

    // A configuration that cannot be built is fatal, not retried.
    config.browser_config()?;

    let (browser, mut handler) = run_with_retry(policy, || async {
        Ok(Browser::launch(config.browser_config()?).await?)
    })
    .await?;

    info!("Launched browser from {}", config.executable().display());

    let handler_task = task::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                debug!("CDP handler event error: {e}");
            }
        }
    });

    Ok(BrowserHandle {
        browser,
        handler_task,
    })
}
