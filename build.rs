//! Build script for check_pf
//!
//! Embeds build-time information (git commit, dirty status) so `-V` can
//! report exactly which build is deployed on a monitored host.

fn main() {
    shadow_rs::ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build info");
}
