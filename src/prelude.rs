#![doc = r#"
Everything, in one `use`.

```rust
use midion::prelude::*;
```
"#]

pub use crate::bytes::*;
pub use crate::channel::*;
pub use crate::error::*;
pub use crate::events::*;
pub use crate::file::*;
pub use crate::key::*;
pub use crate::notes::*;
pub use crate::reader::*;
pub use crate::settings::*;
pub use crate::timed::*;
pub use crate::writer::*;
