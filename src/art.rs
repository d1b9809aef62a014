// ASCII art banners shown above some screens.

use rand::seq::SliceRandom;
use rand::Rng;

/// Chance that a screen gets a banner.
const BANNER_PROBABILITY: f64 = 0.4;

const BANNERS: [&str; 4] = [
    r#"  __  __                 _
 |  \/  | ___  _ __ ___ | |__   ___ _ __ ___
 | |\/| |/ _ \| '_ ` _ \| '_ \ / _ \ '__/ __|
 | |  | | (_) | | | | | | |_) |  __/ |  \__ \
 |_|  |_|\___/|_| |_| |_|_.__/ \___|_|  |___/"#,
    r#"    .-"-.
   / .===. \
   \/ 6 6 \/
   (  \_/  )
___ooo__V__ooo___"#,
    r#"   .:::.
  :::::::.
  :::::::.
  '::::::::'
    '::::'"#,
    r#"   (\_/)
  ('.')  *
  (')_(')"#,
];

/// Roll for a banner using `rng`. Returns `None` most of the time.
pub fn maybe_banner<R: Rng + ?Sized>(rng: &mut R) -> Option<&'static str> {
    if rng.gen_bool(BANNER_PROBABILITY) {
        BANNERS.choose(rng).copied()
    } else {
        None
    }
}
