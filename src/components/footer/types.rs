pub struct FooterItem {
    pub key: &'static str,
    pub desc: &'static str,
    pub highlighted: bool,
}

impl FooterItem {
    pub const fn new(key: &'static str, desc: &'static str) -> Self {
        Self {
            key,
            desc,
            highlighted: false,
        }
    }

    #[must_use]
    pub const fn highlighted_if(mut self, on: bool) -> Self {
        self.highlighted = on;
        self
    }
}

pub struct FooterGroup {
    pub name: &'static str,
    pub items: Vec<FooterItem>,
}

impl FooterGroup {
    pub fn new(name: &'static str, items: Vec<FooterItem>) -> Self {
        Self { name, items }
    }
}
