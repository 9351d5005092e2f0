//! Exact rational matrices.
//!
//! Matrices are stored as a sequence of row vectors. Every entry is an
//! exact rational, so elimination never loses precision and a pivot is
//! either exactly zero or exactly invertible.

use std::fmt;
use std::ops::Index;

use surd_integers::{Result, SurdError};
use surd_rings::{ExactField, ExactRing, Operand, RationalNumber};
use tracing::{debug, trace};

use crate::vector::Vector;

/// A row or column of a matrix, for cofactor expansion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    /// The row at this index.
    Row(usize),
    /// The column at this index.
    Column(usize),
}

/// Result of reducing a matrix to reduced row echelon form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowReduction {
    /// The reduced matrix.
    pub matrix: Matrix,
    /// Number of pivots.
    pub rank: usize,
    /// Column of each pivot, by pivot row.
    pub pivot_columns: Vec<usize>,
}

/// A rectangular matrix of rationals, stored by rows.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Matrix {
    rows: Vec<Vector>,
    ncols: usize,
}

impl Matrix {
    /// Creates a matrix from its rows.
    ///
    /// # Errors
    ///
    /// - `MalformedInput` if there are no rows or no columns.
    /// - `DimensionMismatch` if the rows have different lengths.
    pub fn from_rows(rows: Vec<Vector>) -> Result<Self> {
        let ncols = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            Some(_) => return Err(SurdError::malformed("matrix rows must not be empty")),
            None => return Err(SurdError::malformed("matrix must have at least one row")),
        };
        if let Some(bad) = rows.iter().find(|r| r.len() != ncols) {
            return Err(SurdError::DimensionMismatch {
                expected: ncols,
                found: bad.len(),
            });
        }
        Ok(Self { rows, ncols })
    }

    /// Creates a matrix from rows of anything convertible to an [`Operand`].
    ///
    /// # Errors
    ///
    /// See [`Matrix::from_rows`] and [`Vector::from_operands`].
    pub fn from_operands<R, T>(rows: impl IntoIterator<Item = R>) -> Result<Self>
    where
        R: IntoIterator<Item = T>,
        T: Into<Operand>,
    {
        let rows = rows
            .into_iter()
            .map(Vector::from_operands)
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(rows)
    }

    fn filled(nrows: usize, ncols: usize, value: &RationalNumber) -> Result<Self> {
        Self::from_rows(vec![Vector::new(vec![value.clone(); ncols]); nrows])
    }

    /// The `nrows × ncols` zero matrix.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if either dimension is zero.
    pub fn zeros(nrows: usize, ncols: usize) -> Result<Self> {
        Self::filled(nrows, ncols, &RationalNumber::zero())
    }

    /// The `nrows × ncols` matrix of ones.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if either dimension is zero.
    pub fn ones(nrows: usize, ncols: usize) -> Result<Self> {
        Self::filled(nrows, ncols, &RationalNumber::one())
    }

    /// The `n × n` identity.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if `n` is zero.
    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::zeros(n, n)?;
        for (i, row) in m.rows.iter_mut().enumerate() {
            *row = (0..n)
                .map(|j| {
                    if i == j {
                        RationalNumber::one()
                    } else {
                        RationalNumber::zero()
                    }
                })
                .collect();
        }
        Ok(m)
    }

    /// Number of rows.
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Checks if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols
    }

    /// Returns the row at `i`.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<&Vector> {
        self.rows.get(i)
    }

    /// The rows.
    #[must_use]
    pub fn rows(&self) -> &[Vector] {
        &self.rows
    }

    /// Returns the entry at (row, col).
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&RationalNumber> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Returns column `col` as a vector.
    #[must_use]
    pub fn column(&self, col: usize) -> Option<Vector> {
        (col < self.ncols).then(|| self.column_unchecked(col))
    }

    fn column_unchecked(&self, col: usize) -> Vector {
        self.rows.iter().map(|r| r[col].clone()).collect()
    }

    /// Returns the transpose of the matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self {
            rows: (0..self.ncols).map(|j| self.column_unchecked(j)).collect(),
            ncols: self.nrows(),
        }
    }

    /// Matrix-vector multiply: y = A * x.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` unless `x` has `ncols` entries.
    pub fn mul_vector(&self, x: &Vector) -> Result<Vector> {
        if x.len() != self.ncols {
            return Err(SurdError::DimensionMismatch {
                expected: self.ncols,
                found: x.len(),
            });
        }
        self.rows
            .iter()
            .map(|row| row.dot_sum(x))
            .collect::<Result<Vec<_>>>()
            .map(Vector::new)
    }

    /// Matrix-matrix multiply: C = A * B.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` unless `other` has `ncols` rows.
    pub fn mul_matrix(&self, other: &Self) -> Result<Self> {
        self.ensure_inner(other)?;
        let columns = other.transpose();
        let rows = self
            .rows
            .iter()
            .map(|row| columns.mul_vector(row))
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(rows)
    }

    pub(crate) fn ensure_inner(&self, other: &Self) -> Result<()> {
        if self.ncols == other.nrows() {
            Ok(())
        } else {
            Err(SurdError::DimensionMismatch {
                expected: self.ncols,
                found: other.nrows(),
            })
        }
    }

    /// Scales all entries by a scalar.
    ///
    /// # Errors
    ///
    /// Propagates rational arithmetic errors.
    pub fn scale(&self, scalar: &RationalNumber) -> Result<Self> {
        let rows = self
            .rows
            .iter()
            .map(|r| r.scale(scalar))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            rows,
            ncols: self.ncols,
        })
    }

    fn ensure_same_shape(&self, other: &Self) -> Result<()> {
        if self.nrows() != other.nrows() {
            return Err(SurdError::DimensionMismatch {
                expected: self.nrows(),
                found: other.nrows(),
            });
        }
        if self.ncols != other.ncols {
            return Err(SurdError::DimensionMismatch {
                expected: self.ncols,
                found: other.ncols,
            });
        }
        Ok(())
    }

    /// Elementwise sum.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` for matrices of different shapes.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.ensure_same_shape(other)?;
        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(a, b)| a.checked_add(b))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            rows,
            ncols: self.ncols,
        })
    }

    /// Elementwise difference.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` for matrices of different shapes.
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.checked_add(&other.scale(&RationalNumber::one().negate())?)
    }

    /// `[self | other]`, the columns of `other` appended to each row.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` unless both have the same number of rows.
    pub fn augment(&self, other: &Self) -> Result<Self> {
        if self.nrows() != other.nrows() {
            return Err(SurdError::DimensionMismatch {
                expected: self.nrows(),
                found: other.nrows(),
            });
        }
        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(a, b)| a.iter().chain(b.iter()).cloned().collect())
            .collect();
        Self::from_rows(rows)
    }

    fn ensure_square(&self) -> Result<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(SurdError::DimensionMismatch {
                expected: self.nrows(),
                found: self.ncols,
            })
        }
    }

    // ========================================================================
    // Determinant
    // ========================================================================

    /// Determinant by Laplace expansion along the first row.
    ///
    /// Exponential in the dimension; [`Matrix::det_parallel`] spreads the
    /// first level of the expansion over threads.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` for a non-square matrix.
    pub fn det(&self) -> Result<RationalNumber> {
        self.ensure_square()?;
        debug!(n = self.nrows(), "determinant by cofactor expansion");
        let all: Vec<usize> = (0..self.ncols).collect();
        self.minor_det(&all, &all)
    }

    /// Determinant by cofactor expansion along the given row or column.
    ///
    /// Agrees with [`Matrix::det`] for every line.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` for a non-square matrix.
    /// - `MalformedInput` if the line index is out of range.
    pub fn det_along(&self, line: Line) -> Result<RationalNumber> {
        self.ensure_square()?;
        let n = self.nrows();
        let (Line::Row(k) | Line::Column(k)) = line;
        if k >= n {
            return Err(SurdError::malformed(format!("{line:?} is outside a {n}x{n} matrix")));
        }
        debug!(n, ?line, "determinant along line");

        let mut total = RationalNumber::zero();
        for other in 0..n {
            let (r, c) = match line {
                Line::Row(_) => (k, other),
                Line::Column(_) => (other, k),
            };
            let term = self.cofactor(r, c)?;
            total = total.checked_add(&term)?;
        }
        Ok(total)
    }

    /// `(-1)^(r+c) · a[r][c] · det(minor(r, c))`.
    pub(crate) fn cofactor(&self, r: usize, c: usize) -> Result<RationalNumber> {
        let entry = &self.rows[r][c];
        if entry.is_zero() {
            return Ok(RationalNumber::zero());
        }
        let rows: Vec<usize> = (0..self.nrows()).filter(|&i| i != r).collect();
        let cols: Vec<usize> = (0..self.ncols).filter(|&j| j != c).collect();
        let minor = if rows.is_empty() {
            RationalNumber::one()
        } else {
            self.minor_det(&rows, &cols)?
        };
        let term = entry.checked_mul(&minor)?;
        Ok(if (r + c) % 2 == 1 { term.negate() } else { term })
    }

    /// Determinant of the submatrix on `rows × cols` (equal lengths, non-empty).
    fn minor_det(&self, rows: &[usize], cols: &[usize]) -> Result<RationalNumber> {
        let Some((&top, rest)) = rows.split_first() else {
            return Ok(RationalNumber::one());
        };
        if rest.is_empty() {
            return Ok(self.rows[top][cols[0]].clone());
        }

        let mut total = RationalNumber::zero();
        for (i, &c) in cols.iter().enumerate() {
            let entry = &self.rows[top][c];
            if entry.is_zero() {
                continue;
            }
            let remaining: Vec<usize> = cols.iter().copied().filter(|&j| j != c).collect();
            let term = entry.checked_mul(&self.minor_det(rest, &remaining)?)?;
            total = if i % 2 == 0 {
                total.checked_add(&term)?
            } else {
                total.checked_sub(&term)?
            };
        }
        Ok(total)
    }

    // ========================================================================
    // Row reduction
    // ========================================================================

    /// Reduced row echelon form (RREF) using Gauss-Jordan elimination.
    ///
    /// Works on a copy. Each pivot is the first nonzero entry at or below
    /// the pivot row; a column with none is skipped as a free column.
    /// Pivots are scaled to exactly 1 and cleared from every other row.
    ///
    /// # Errors
    ///
    /// Propagates rational arithmetic errors.
    pub fn rref(&self) -> Result<RowReduction> {
        let nrows = self.nrows();
        debug!(nrows, ncols = self.ncols, "row reduction");

        let mut rows = self.rows.clone();
        let mut pivot_columns = Vec::new();
        let mut col = 0;

        'pivots: for pivot_row in 0..nrows {
            let found = loop {
                if col >= self.ncols {
                    break 'pivots;
                }
                if let Some(i) = (pivot_row..nrows).find(|&i| !rows[i][col].is_zero()) {
                    break i;
                }
                trace!(column = col, "free column");
                col += 1;
            };

            rows.swap(pivot_row, found);
            let inverse = rows[pivot_row][col].recip()?;
            rows[pivot_row] = rows[pivot_row].scale(&inverse)?;

            for i in 0..nrows {
                if i == pivot_row || rows[i][col].is_zero() {
                    continue;
                }
                let eliminated = rows[pivot_row].scale(&rows[i][col])?;
                rows[i] = rows[i].checked_sub(&eliminated)?;
            }

            trace!(row = pivot_row, column = col, swapped_from = found, "pivot");
            pivot_columns.push(col);
            col += 1;
        }

        Ok(RowReduction {
            matrix: Self {
                rows,
                ncols: self.ncols,
            },
            rank: pivot_columns.len(),
            pivot_columns,
        })
    }

    /// Number of linearly independent rows.
    ///
    /// # Errors
    ///
    /// Propagates rational arithmetic errors.
    pub fn rank(&self) -> Result<usize> {
        Ok(self.rref()?.rank)
    }

    /// Solves the linear system Ax = b.
    ///
    /// Returns `None` if no solution exists. With free variables, returns the
    /// solution that sets all of them to zero.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` unless `b` has `nrows` entries.
    pub fn solve(&self, b: &Vector) -> Result<Option<Vector>> {
        if b.len() != self.nrows() {
            return Err(SurdError::DimensionMismatch {
                expected: self.nrows(),
                found: b.len(),
            });
        }
        let rhs = Self::from_rows(b.iter().map(|x| Vector::new(vec![x.clone()])).collect())?;
        let reduced = self.augment(&rhs)?.rref()?;

        // A pivot in the augmented column means 0 = 1.
        if reduced.pivot_columns.contains(&self.ncols) {
            return Ok(None);
        }

        let mut x = vec![RationalNumber::zero(); self.ncols];
        for (row, &col) in reduced.pivot_columns.iter().enumerate() {
            x[col] = reduced.matrix.rows[row][self.ncols].clone();
        }
        Ok(Some(Vector::new(x)))
    }

    /// Inverse by reducing `[A | I]`.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` for a non-square matrix.
    /// - `DivisionByZero` for a singular matrix.
    pub fn inverse(&self) -> Result<Self> {
        self.ensure_square()?;
        let n = self.nrows();
        let reduced = self.augment(&Self::identity(n)?)?.rref()?;

        let left_pivots = reduced.pivot_columns.iter().filter(|&&c| c < n).count();
        if left_pivots < n {
            debug!(n, rank = left_pivots, "matrix is singular");
            return Err(SurdError::DivisionByZero);
        }

        let rows = reduced
            .matrix
            .rows
            .iter()
            .map(|r| r.iter().skip(n).cloned().collect())
            .collect();
        Self::from_rows(rows)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = RationalNumber;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.rows[row][col]
    }
}

impl fmt::Display for Matrix {
    /// One bracketed row per line, entries centred to the widest entry.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| r.iter().map(ToString::to_string).collect())
            .collect();
        let width = cells.iter().flatten().map(String::len).max().unwrap_or(0);

        for (i, row) in cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{cell:^width$}")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}
