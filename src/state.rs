#[derive(Debug, PartialEq, Clone, Copy)]
pub enum PageState {
    Loading,       // Splash screen while the page settles
    Showing,       // Greeting, slideshow and gallery are up
    Closed,        // Torn down, nothing may fire anymore
}
