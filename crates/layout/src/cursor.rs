use crate::canvas::DrawCommand;

/// Where the next piece of content goes: a page index and the top edge of
/// the next line in PDF coordinates. Content flows downward, so `y` decreases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub page_index: usize,
    pub y: f32,
}

impl LayoutCursor {
    pub fn new(page_index: usize, y: f32) -> Self {
        Self { page_index, y }
    }

    pub fn moved_down(self, distance: f32) -> Self {
        Self {
            y: self.y - distance,
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCommand {
    pub page_index: usize,
    pub command: DrawCommand,
}

/// Output of a placement step: the commands it produced and the cursor the
/// next step starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub cursor: LayoutCursor,
    pub commands: Vec<PlacedCommand>,
}

impl Placement {
    pub fn at(cursor: LayoutCursor) -> Self {
        Self {
            cursor,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, page_index: usize, command: DrawCommand) {
        self.commands.push(PlacedCommand {
            page_index,
            command,
        });
    }

    pub fn push_all(&mut self, page_index: usize, commands: impl IntoIterator<Item = DrawCommand>) {
        self.commands.extend(commands.into_iter().map(|command| PlacedCommand {
            page_index,
            command,
        }));
    }

    /// Appends a later step; its cursor becomes this placement's cursor.
    pub fn then(mut self, next: Placement) -> Self {
        self.commands.extend(next.commands);
        self.cursor = next.cursor;
        self
    }

    pub fn with_cursor(mut self, cursor: LayoutCursor) -> Self {
        self.cursor = cursor;
        self
    }
}
