//! Static reply texts.

pub const MSG_UNKNOWN_COMMAND: &str = "Unknown command 🤔";
pub const MSG_SAVED: &str = "Saved! 👌";
pub const MSG_NO_MEALS: &str = "No meals saved yet 🙊 Be the first to /add one!";

pub const MSG_HELP: &str = "Commands:
/meal - get a random meal
/add - add a new meal to the collection, see /add_sample.
    Format:

    /add

    photo: <photo url*>
    ===
    name: <meal name*>
    ===
    instructions: <instructions paragraph>
    ===
    description: <description paragraph>

    - Replace '<>' with content.
    - Put the === delimiter between sections, not after the last one.
    - * marks a required value.
    - Sections can come in any order.
";

pub const MSG_HELLO: &str = "Hi there! 👾
Not sure what to cook today? Just ask me!

Send /meal and I will find a meal for you.

For more information and other commands send /help";

pub const MSG_ADD_SAMPLE: &str = "/add

photo: https://upload.wikimedia.org/wikipedia/commons/thumb/d/dd/Afghan_Palo.jpg/280px-Afghan_Palo.jpg
===
name: Kabuli Pulao
===
instructions:
1. Soak the basmati rice in warm water.
2. Brown the lamb with onions, then simmer in stock.
3. Layer the rice over the meat and steam until tender.
===
description: Afghan rice pilaf with lamb, carrots and raisins.";
