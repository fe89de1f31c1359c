mod alarm;
mod dice;
mod help;
mod join;
mod leave;
mod lyrics;
mod loop_cmd;
mod pause;
mod play;
mod queue;
mod roulette;
mod rps;
mod search;
mod skip;
mod stop;
pub mod voice;
mod xo;

use crate::{Data, Error};

pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![
        help::help(),
        join::join(),
        leave::leave(),
        play::play(),
        play::p(),
        pause::pause(),
        pause::resume(),
        skip::skip(),
        skip::s(),
        stop::stop(),
        loop_cmd::loop_cmd(),
        queue::queue(),
        queue::q(),
        queue::clear(),
        search::search(),
        lyrics::lyrics(),
        rps::rps(),
        xo::xo(),
        dice::dice(),
        roulette::rr(),
        roulette::rr_stats(),
        roulette::rr_graph(),
        alarm::setalarm(),
    ]
}
