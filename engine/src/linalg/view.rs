use std::fmt;

use super::{check_index, fmt_matrix, fmt_vector, MatrixRead, MatrixWrite, VectorRead, VectorWrite};

/// Read-only matrix computed on demand from borrowed operands.
pub struct MatrixView<'a> {
    rows: usize,
    columns: usize,
    entry: Box<dyn Fn(usize, usize) -> f64 + 'a>,
}

impl<'a> MatrixView<'a> {
    /// A `rows x columns` view whose entries come from `entry`.
    pub fn new(rows: usize, columns: usize, entry: impl Fn(usize, usize) -> f64 + 'a) -> Self {
        Self { rows, columns, entry: Box::new(entry) }
    }
}

impl MatrixRead for MatrixView<'_> {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn get(&self, row: usize, column: usize) -> f64 {
        check_index(row, column, self.rows, self.columns);
        (self.entry)(row, column)
    }
}

impl fmt::Debug for MatrixView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixView").field("rows", &self.rows).field("columns", &self.columns).finish()
    }
}

impl fmt::Display for MatrixView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_matrix(self, f)
    }
}

/// Read-only vector computed on demand from borrowed operands.
pub struct VectorView<'a> {
    len: usize,
    entry: Box<dyn Fn(usize) -> f64 + 'a>,
}

impl<'a> VectorView<'a> {
    /// A view of `len` entries produced by `entry`.
    pub fn new(len: usize, entry: impl Fn(usize) -> f64 + 'a) -> Self {
        Self { len, entry: Box::new(entry) }
    }
}

impl VectorRead for VectorView<'_> {
    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, index: usize) -> f64 {
        assert!(index < self.len, "index {index} out of range for length {}", self.len);
        (self.entry)(index)
    }
}

impl fmt::Debug for VectorView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorView").field("len", &self.len).finish()
    }
}

impl fmt::Display for VectorView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_vector(self, f)
    }
}

/// Writable window onto a borrowed row-major buffer.
///
/// Entry `(r, c)` lives at `offset + r * row_stride + c * column_stride`.
#[derive(Debug)]
pub struct MatrixViewMut<'a> {
    data: &'a mut [f64],
    rows: usize,
    columns: usize,
    offset: usize,
    row_stride: usize,
    column_stride: usize,
}

impl<'a> MatrixViewMut<'a> {
    /// The whole of a `rows x columns` row-major buffer.
    pub(crate) fn dense(data: &'a mut [f64], rows: usize, columns: usize) -> Self {
        debug_assert_eq!(data.len(), rows * columns);
        Self { data, rows, columns, offset: 0, row_stride: columns, column_stride: 1 }
    }

    fn index(&self, row: usize, column: usize) -> usize {
        check_index(row, column, self.rows, self.columns);
        self.offset + row * self.row_stride + column * self.column_stride
    }

    /// Shorter-lived copy of this view.
    pub fn reborrow(&mut self) -> MatrixViewMut<'_> {
        MatrixViewMut { data: &mut *self.data, ..*self }
    }

    /// Writable view of one row.
    pub fn row_mut(&mut self, row: usize) -> VectorViewMut<'_> {
        self.reborrow().into_row(row)
    }

    /// Writable view of one column.
    pub fn column_mut(&mut self, column: usize) -> VectorViewMut<'_> {
        self.reborrow().into_column(column)
    }

    /// Writable `rows x columns` sub-block starting at `(row, column)`.
    pub fn block_mut(&mut self, row: usize, column: usize, rows: usize, columns: usize) -> MatrixViewMut<'_> {
        self.reborrow().into_block(row, column, rows, columns)
    }

    /// Writable transpose; writes land in the original layout.
    pub fn transpose_mut(&mut self) -> MatrixViewMut<'_> {
        self.reborrow().into_transpose()
    }

    /// Consume the view, keeping one row.
    pub fn into_row(self, row: usize) -> VectorViewMut<'a> {
        assert!(row < self.rows, "row {row} out of range for {} rows", self.rows);
        VectorViewMut {
            data: self.data,
            len: self.columns,
            offset: self.offset + row * self.row_stride,
            stride: self.column_stride,
        }
    }

    /// Consume the view, keeping one column.
    pub fn into_column(self, column: usize) -> VectorViewMut<'a> {
        assert!(column < self.columns, "column {column} out of range for {} columns", self.columns);
        VectorViewMut {
            data: self.data,
            len: self.rows,
            offset: self.offset + column * self.column_stride,
            stride: self.row_stride,
        }
    }

    /// Consume the view, keeping a sub-block.
    pub fn into_block(self, row: usize, column: usize, rows: usize, columns: usize) -> MatrixViewMut<'a> {
        assert!(
            row + rows <= self.rows && column + columns <= self.columns,
            "block {rows}x{columns} at ({row}, {column}) exceeds {}x{} view",
            self.rows,
            self.columns
        );
        MatrixViewMut {
            offset: self.offset + row * self.row_stride + column * self.column_stride,
            rows,
            columns,
            ..self
        }
    }

    /// Consume the view, swapping its axes.
    pub fn into_transpose(self) -> MatrixViewMut<'a> {
        MatrixViewMut {
            rows: self.columns,
            columns: self.rows,
            row_stride: self.column_stride,
            column_stride: self.row_stride,
            ..self
        }
    }
}

impl MatrixRead for MatrixViewMut<'_> {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn get(&self, row: usize, column: usize) -> f64 {
        self.data[self.index(row, column)]
    }
}

impl MatrixWrite for MatrixViewMut<'_> {
    fn set(&mut self, row: usize, column: usize, value: f64) {
        let i = self.index(row, column);
        self.data[i] = value;
    }
}

impl fmt::Display for MatrixViewMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_matrix(self, f)
    }
}

/// Writable strided window onto a borrowed buffer.
#[derive(Debug)]
pub struct VectorViewMut<'a> {
    data: &'a mut [f64],
    len: usize,
    offset: usize,
    stride: usize,
}

impl<'a> VectorViewMut<'a> {
    pub(crate) fn contiguous(data: &'a mut [f64], offset: usize, len: usize) -> Self {
        assert!(offset + len <= data.len(), "slice {offset}..{} exceeds length {}", offset + len, data.len());
        Self { data, len, offset, stride: 1 }
    }

    fn index(&self, index: usize) -> usize {
        assert!(index < self.len, "index {index} out of range for length {}", self.len);
        self.offset + index * self.stride
    }
}

impl VectorRead for VectorViewMut<'_> {
    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, index: usize) -> f64 {
        self.data[self.index(index)]
    }
}

impl VectorWrite for VectorViewMut<'_> {
    fn set(&mut self, index: usize, value: f64) {
        let i = self.index(index);
        self.data[i] = value;
    }
}

impl fmt::Display for VectorViewMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_vector(self, f)
    }
}
