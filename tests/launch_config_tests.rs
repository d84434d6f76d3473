//! Tests for launch-configuration assembly

use pagegraph_crawl::{CrawlArgs, DebugLevel, LaunchConfig, ProxyServer};
use std::path::Path;

fn base_args() -> CrawlArgs {
    CrawlArgs::builder()
        .output_path("/tmp/crawl-output")
        .executable_path("/usr/bin/brave")
        .build()
        .unwrap()
}

#[test]
fn base_flags_bind_the_profile_and_enable_pagegraph() {
    let args = base_args();
    let config = LaunchConfig::for_args(&args, Path::new("/tmp/profile-x"));

    assert_eq!(config.executable(), Path::new("/usr/bin/brave"));
    assert_eq!(config.profile_path(), Path::new("/tmp/profile-x"));

    let flags = config.args();
    assert!(flags.contains(&"--user-data-dir=/tmp/profile-x".to_string()));
    assert!(flags.contains(&"--enable-features=PageGraph".to_string()));
    assert!(flags.contains(&"--disable-brave-update".to_string()));
    assert!(flags.contains(&"--disable-site-isolation-trials".to_string()));
    assert!(flags.contains(&"--mute-audio".to_string()));

    // The product-feature denylist is passed through as one joined flag.
    let disable_features = flags
        .iter()
        .find(|f| f.starts_with("--disable-features="))
        .expect("denylist flag present");
    assert!(disable_features.contains("BraveSync"));
    assert!(disable_features.contains("BraveRewards"));
    assert!(disable_features.contains("SiteVisit"));
}

#[test]
fn normal_debug_level_stays_quiet() {
    let config = LaunchConfig::for_args(&base_args(), Path::new("/tmp/p"));

    assert!(!config.dump_io());
    assert!(!config.args().iter().any(|f| f.starts_with("--enable-logging")));
    assert!(!config.args().iter().any(|f| f.starts_with("--vmodule")));
}

#[test]
fn verbose_debug_level_pipes_and_raises_module_logging() {
    let args = CrawlArgs::builder()
        .output_path("/tmp/crawl-output")
        .executable_path("/usr/bin/brave")
        .debug_level(DebugLevel::Verbose)
        .build()
        .unwrap();
    let config = LaunchConfig::for_args(&args, Path::new("/tmp/p"));

    assert!(config.dump_io());
    assert!(config.args().contains(&"--enable-logging=stderr".to_string()));
    assert!(config.args().contains(&"--vmodule=page_graph*=2".to_string()));
}

#[test]
fn extensions_path_adds_load_flags() {
    let args = CrawlArgs::builder()
        .output_path("/tmp/crawl-output")
        .executable_path("/usr/bin/brave")
        .extensions_path("/opt/crawl-extensions")
        .build()
        .unwrap();
    let config = LaunchConfig::for_args(&args, Path::new("/tmp/p"));

    assert!(
        config
            .args()
            .contains(&"--disable-extensions-except=/opt/crawl-extensions".to_string())
    );
    assert!(
        config
            .args()
            .contains(&"--load-extension=/opt/crawl-extensions".to_string())
    );
}

#[test]
fn socks5_proxy_gets_a_dns_leak_guard() {
    let args = CrawlArgs::builder()
        .output_path("/tmp/crawl-output")
        .executable_path("/usr/bin/brave")
        .proxy_server(ProxyServer::new("socks5", "proxy.internal", Some(1080)))
        .build()
        .unwrap();
    let config = LaunchConfig::for_args(&args, Path::new("/tmp/p"));

    assert!(
        config
            .args()
            .contains(&"--proxy-server=socks5://proxy.internal:1080".to_string())
    );
    assert!(config.args().contains(
        &"--host-resolver-rules=MAP * ~NOTFOUND , EXCLUDE proxy.internal".to_string()
    ));
}

#[test]
fn non_socks5_proxy_gets_no_resolver_override() {
    let args = CrawlArgs::builder()
        .output_path("/tmp/crawl-output")
        .executable_path("/usr/bin/brave")
        .proxy_server(ProxyServer::new("http", "proxy.internal", Some(8080)))
        .build()
        .unwrap();
    let config = LaunchConfig::for_args(&args, Path::new("/tmp/p"));

    assert!(
        config
            .args()
            .contains(&"--proxy-server=http://proxy.internal:8080".to_string())
    );
    assert!(
        !config
            .args()
            .iter()
            .any(|f| f.starts_with("--host-resolver-rules"))
    );
}

#[test]
fn extra_args_come_last_so_they_can_override() {
    let args = CrawlArgs::builder()
        .output_path("/tmp/crawl-output")
        .executable_path("/usr/bin/brave")
        .proxy_server(ProxyServer::new("http", "proxy.internal", None))
        .extra_args(vec![
            "--window-size=800,600".to_string(),
            "--enable-features=PageGraph,SomethingElse".to_string(),
        ])
        .build()
        .unwrap();
    let config = LaunchConfig::for_args(&args, Path::new("/tmp/p"));

    let flags = config.args();
    let len = flags.len();
    assert_eq!(flags[len - 2], "--window-size=800,600");
    assert_eq!(flags[len - 1], "--enable-features=PageGraph,SomethingElse");
}

#[test]
fn output_dir_rides_in_the_child_environment() {
    let config = LaunchConfig::for_args(&base_args(), Path::new("/tmp/p"));

    assert_eq!(
        config.env(),
        &[(
            "PAGEGRAPH_OUT_DIR".to_string(),
            "/tmp/crawl-output".to_string()
        )]
    );
    // The parent process environment is never touched.
    assert!(std::env::var("PAGEGRAPH_OUT_DIR").is_err());
}
