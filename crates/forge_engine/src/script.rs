use std::time::Duration;

/// Simulated generation latency before a draft is delivered.
pub(crate) const GENERATION_DELAY: Duration = Duration::from_millis(800);

/// Stub script generator. The core treats the draft as opaque content; a
/// real model call would slot in behind the same engine command.
pub fn draft_script(topic: &str, platform: &str) -> String {
    format!(
        "**Title:** {topic}: The Hidden Truth\n\
         \n\
         **Hook (0-3s):**\n\
         You will never guess what is hiding behind {topic}. It is wild.\n\
         \n\
         **Body (3-40s):**\n\
         Most people think it is complicated. In fact one simple trick is \
         all it takes.\n\
         Watch this: it is exactly why the experts keep quiet about it.\n\
         \n\
         **Call to action (40-60s):**\n\
         Follow for part 2 -- {platform} gets the full reveal first!"
    )
}
