//! 标注输出过滤

use streletz_core::{annotation_row, AnnotationSink, FieldEvent, StreletzError};

/// 只转发选定标注行中的事件
#[derive(Debug)]
pub struct RowFilterSink<S> {
    inner: S,
    rows: Vec<&'static str>,
}

impl<S: AnnotationSink> RowFilterSink<S> {
    /// # 参数
    /// - `inner`: 实际的输出
    /// - `rows`: 标注行标识，如`framing`、`packets`
    pub fn new<I, T>(inner: S, rows: I) -> Result<Self, StreletzError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut selected = Vec::new();
        for row in rows {
            let row = row.as_ref().trim();
            let found = annotation_row(row).ok_or_else(|| {
                StreletzError::invalid_option("rows", format!("unknown annotation row `{row}`"))
            })?;
            if !selected.contains(&found.id) {
                selected.push(found.id);
            }
        }
        Ok(Self {
            inner,
            rows: selected,
        })
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: AnnotationSink> AnnotationSink for RowFilterSink<S> {
    fn put(&mut self, event: FieldEvent) {
        if self.rows.contains(&event.class.row().id) {
            self.inner.put(event);
        }
    }
}
